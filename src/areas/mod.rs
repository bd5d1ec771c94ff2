//! Core repository components
//!
//! This module contains the persisted building blocks of a repository:
//!
//! - `database`: snapshot store, one full tree copy plus metadata per commit
//! - `lock`: repository-level exclusive lock for mutating commands
//! - `refs`: reference store (`HEAD`, branches) and the active branch marker
//! - `repository`: high-level repository handle tying the areas together
//! - `staging`: staging area mirroring the tracked working tree
//! - `workspace`: working tree access and path resolution

pub mod database;
pub mod lock;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
