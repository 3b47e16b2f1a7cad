//! The numeric fitting engine.
//!
//! Responsibilities:
//!
//! - own the mutable point set and the polynomial model
//! - perform synchronous batch gradient-descent updates
//! - evaluate fit cost
//! - expose a single orchestration boundary (`FitController`) to front-ends
//!
//! Everything here is single-threaded and free of I/O; rendering, text
//! formatting, and the periodic timer that drives auto-iteration live in the
//! front-ends.

pub mod auto;
pub mod controller;
pub mod cost;
pub mod descent;
pub mod model;
pub mod points;

pub use auto::AutoIterate;
pub use controller::{ChangeSet, FitController};
pub use cost::cost;
pub use descent::GradientDescentEngine;
pub use model::PolynomialModel;
pub use points::{PointSet, ToggleOutcome};
