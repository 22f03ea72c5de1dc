use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Rejected before any agent is built, so a failed construction leaves nothing behind.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
