//! Commit identifiers and metadata
//!
//! A commit is an id plus a metadata record (parents, date, message) plus the
//! snapshot directory stored under the same id.

pub mod commit;
pub mod commit_id;

/// Number of characters in a commit id
pub const COMMIT_ID_LENGTH: usize = 40;

/// Characters a commit id is drawn from
pub const COMMIT_ID_ALPHABET: &[u8; 16] = b"0123456789abcdef";
