#![forbid(unsafe_code)]

use thiserror::Error;

use crate::color::ParseColorError;
use crate::config::PlaygroundConfigError;

pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("config: {0}")]
    Config(#[from] PlaygroundConfigError),

    #[error("invalid color: {0}")]
    Color(#[from] ParseColorError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    Usage(String),
}

impl PlaygroundError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Color(_) => 2,
            Self::Config(_) => 3,
            Self::Io(_) => 1,
        }
    }
}
