//! Tree comparison
//!
//! - `tree_diff`: recursive comparison of two directory trees into
//!   modified / only-in-A / only-in-B change records

pub mod tree_diff;
