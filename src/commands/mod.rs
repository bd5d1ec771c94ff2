//! Command implementations
//!
//! Only porcelain commands exist: the object model is plain directory
//! snapshots, so there is no lower plumbing layer to expose.

pub mod porcelain;
