//! Query modules for each table.

pub mod ratings;
pub mod similarities;
