use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors raised by the CLI and configuration layers.
///
/// The adapter itself never fails; these only cover reading inputs,
/// loading configuration, and the opt-in strict mode.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("invalid configuration: {}", errors.join("; "))]
    InvalidConfig { errors: Vec<String> },

    #[error("strict mode: adapter emitted {count} warning(s)")]
    StrictWarnings { count: usize },
}

impl ViewError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StrictWarnings { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
