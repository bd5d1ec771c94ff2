//! Working tree status inspection
//!
//! Three tree comparisons make up a status report:
//!
//! - current commit's snapshot vs staging area: changes to be committed
//! - staging area vs working tree: tracked files modified or deleted but not
//!   staged
//! - staging area vs working tree, working side only: untracked files
//!
//! ## Components
//!
//! - `file_change`: change kinds and their labels
//! - `status_info`: runs the comparisons and aggregates the report

pub mod file_change;
pub mod status_info;
