//! `gapfill` library crate.
//!
//! The binary (`gapfill`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without spawning processes
//! - the core (`math`, `fit`, `models`) stays free of I/O
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
