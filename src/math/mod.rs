//! Mathematical utilities: polynomial evaluation primitives.

pub mod poly;

pub use poly::*;
