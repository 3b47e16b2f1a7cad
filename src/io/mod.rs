//! File input/output: fitted-curve JSON export and read-back.

pub mod curve;

pub use curve::*;
