//! Commit graph traversal and rendering
//!
//! - `walker`: collects the ancestor node/edge set of a commit
//! - `render`: layers reference names on top and emits Graphviz DOT

pub mod render;
pub mod walker;
