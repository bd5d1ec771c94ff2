//! Commit identifier
//!
//! Commit ids are 40 characters drawn at random from `[0-9a-f]`. They are
//! not derived from the snapshot content, so two commits of the same tree get
//! different ids and uniqueness is only probabilistic. The snapshot store
//! guards against collisions by regenerating when an id is already taken.
//!
//! ## Format
//!
//! - Full: 40 characters (e.g., "3fa9...0c1d")
//! - Short: first 7 characters

use crate::artifacts::objects::{COMMIT_ID_ALPHABET, COMMIT_ID_LENGTH};
use fake::rand;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Draw a fresh random id
    pub fn generate() -> Self {
        // 256 is a multiple of the alphabet size, so the modulo keeps the draw uniform
        let id = (0..COMMIT_ID_LENGTH)
            .map(|_| {
                let index = rand::random::<u8>() as usize % COMMIT_ID_ALPHABET.len();
                COMMIT_ID_ALPHABET[index] as char
            })
            .collect::<String>();

        CommitId(id)
    }

    /// Parse and validate a commit id
    ///
    /// Returns `None` if the string has the wrong length or contains characters
    /// outside the id alphabet.
    pub fn try_parse(id: &str) -> Option<Self> {
        let id = id.trim();

        if id.len() != COMMIT_ID_LENGTH {
            return None;
        }
        if !id.bytes().all(|b| COMMIT_ID_ALPHABET.contains(&b)) {
            return None;
        }

        Some(CommitId(id.to_string()))
    }

    pub fn to_short_id(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
