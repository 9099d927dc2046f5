use std::path::PathBuf;

use thiserror::Error;

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

/// Failures while reading the reference table.
///
/// All variants are fatal to the table but not to the process: front-ends fall
/// back to an empty table and show the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("File {} not found! Check that it exists or pass --data <file.json>.", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("Failed to read '{}': {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Error loading JSON: {0}")]
    ParseError(String),

    #[error("Invalid temperature key '{key}' for gas '{gas}': {reason}")]
    InvalidTemperatureKey {
        gas: String,
        key: String,
        reason: String,
    },

    #[error("Gas '{0}' has no temperature points")]
    EmptyGas(String),
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(3, err.to_string())
    }
}
