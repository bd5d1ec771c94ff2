pub mod ancestor;
pub mod policy;
