//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - completed-dataset CSV export (`export`)
//! - model JSON read/write (`model`)

pub mod export;
pub mod ingest;
pub mod model;

pub use export::*;
pub use ingest::*;
pub use model::*;
