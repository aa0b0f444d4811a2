//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - regression inputs (`Sample`) and dataset rows (`YearRecord`)
//! - configuration enums (`FitFamily`, `ClampMode`) and `ImputeConfig`
//! - imputation outputs (`Prediction`)

pub mod types;

pub use types::*;
