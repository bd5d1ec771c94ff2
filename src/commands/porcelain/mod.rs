//! Porcelain commands
//!
//! Each command is a method on `Repository`. Commands that mutate the
//! repository hold the repository lock for their whole run and write the
//! references back at the end.
//!
//! - `init`: create the control directory
//! - `add` / `rm`: stage or unstage paths
//! - `commit`: snapshot the staging area
//! - `status`: report staged, unstaged and untracked changes
//! - `branch`: point a branch at `HEAD`
//! - `checkout`: move the working tree to a branch or commit
//! - `merge`: record a two-parent merge commit
//! - `graph`: print the commit graph

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod graph;
pub mod init;
pub mod merge;
pub mod rm;
pub mod status;
