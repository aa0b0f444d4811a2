//! Reporting utilities: model equations and prediction tables.

pub mod format;

pub use format::*;
