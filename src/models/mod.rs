//! Curve model implementations.
//!
//! Models are small value types with a pure `predict(x)` so the fitting and
//! reporting code can stay generic over the family.

pub mod model;

pub use model::*;
