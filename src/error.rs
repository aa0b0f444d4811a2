//! Error types.
//!
//! - [`FitError`] is raised by the numerical core (`math`, `fit`). It never
//!   carries I/O context.
//! - [`AppError`] is what the binary reports: a message plus a process exit code.
//!
//! Exit codes:
//! - `2` configuration / file I/O
//! - `3` no usable input rows
//! - `4` fitting failed

/// Failures of the fitting core. All of them are fatal for the current run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// A pivot fell below the solver tolerance.
    #[error("singular system: pivot {pivot:e} in column {column} is below tolerance")]
    SingularSystem { column: usize, pivot: f64 },

    /// Not enough information in the samples to determine the model.
    #[error("degenerate input ({samples} samples): {reason}")]
    DegenerateInput { samples: usize, reason: &'static str },

    /// `x` and `y` sequences of different lengths.
    #[error("sample length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    /// Matrix is not square or the right-hand side does not match it.
    #[error("malformed linear system: {rows}x{cols} matrix with {rhs}-element right-hand side")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(4, format!("Fit failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
