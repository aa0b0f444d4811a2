//! Curve fitting.
//!
//! Responsibilities:
//!
//! - closed-form straight-line fits (`linear`)
//! - log-linearized exponential fits (`exponential`)
//! - normal-equation polynomial fits (`polynomial`)
//! - pairing both series with a fit family and predicting (`fitter`)

pub mod exponential;
pub mod fitter;
pub mod linear;
pub mod polynomial;

pub use exponential::*;
pub use fitter::*;
pub use linear::*;
pub use polynomial::*;
