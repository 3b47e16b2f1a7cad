//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the model-space observation point (`Point`)
//! - read-only fit state snapshots (`FitSnapshot`)
//! - synthetic sample configuration (`SampleConfig`)
//! - the exported curve schema (`CurveFile`, `CurveGrid`)

pub mod types;

pub use types::*;
