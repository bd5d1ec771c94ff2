use crate::areas::refs::HEAD_REF_NAME;
use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::{Result, WitError};

/// A user-chosen branch name
///
/// Besides git's usual restrictions, `=` and `,` are rejected because the
/// reference file is a list of `name=id` lines, and `HEAD` is reserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(WitError::InvalidBranchName(
                "branch name cannot be empty".to_string(),
            ));
        }

        if name == HEAD_REF_NAME {
            return Err(WitError::InvalidBranchName(format!(
                "'{HEAD_REF_NAME}' is reserved"
            )));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|e| WitError::InvalidBranchName(e.to_string()))?;

        if re.is_match(name) {
            Err(WitError::InvalidBranchName(name.to_string()))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Branch that `init` activates and the first commit lands on
    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
