//! Checkout planning and conflict handling
//!
//! A checkout first collects every pending change that would be lost, and
//! only touches the working tree and staging area when there is none.

pub mod conflict;
pub mod migration;
