//! Repository artifacts
//!
//! Value types and algorithms used by the commands:
//!
//! - `branch`: branch name validation
//! - `checkout`: checkout planning and conflict detection
//! - `core`: tree copy and listing helpers
//! - `diff`: recursive tree comparison
//! - `graph`: ancestor walk and DOT rendering
//! - `merge`: merge base search and result policy
//! - `objects`: commit ids and commit metadata
//! - `status`: status report assembly

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod graph;
pub mod merge;
pub mod objects;
pub mod status;
