use std::fmt;

use crate::engine::model::MAX_COEFFICIENTS;

/// Application-level error carrying a process exit code.
///
/// Exit codes:
/// - 2: bad input (flags, coefficient lists, file paths)
/// - 4: runtime failure (terminal, rendering)
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

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Validation failure for a manually supplied coefficient list.
///
/// All variants are local failures: the model is left untouched and the
/// caller can retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// The input contained no coefficients at all.
    EmptyCoefficientInput,
    /// More coefficients than the maximum supported degree allows.
    TooManyCoefficients { given: usize },
    /// A token that did not parse as a finite number.
    NonNumericCoefficient { token: String },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::EmptyCoefficientInput => {
                write!(f, "Enter at least one coefficient (comma-separated).")
            }
            FitError::TooManyCoefficients { given } => write!(
                f,
                "Too many coefficients: got {given}, maximum is {MAX_COEFFICIENTS}."
            ),
            FitError::NonNumericCoefficient { token } => {
                write!(f, "Not a finite number: '{token}'.")
            }
        }
    }
}

impl std::error::Error for FitError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(2, err.to_string())
    }
}
