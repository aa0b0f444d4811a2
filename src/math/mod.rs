//! Numerical primitives: a dense linear solver and year normalization.
//!
//! Nothing in here allocates beyond per-call workspaces, and nothing performs I/O.

pub mod normalize;
pub mod solver;

pub use normalize::*;
pub use solver::*;
