//! Core utilities shared by the storage areas
//!
//! - `fs_tree`: recursive copy, listing and removal of directory trees that
//!   skip the reserved control entries

pub mod fs_tree;
