use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body is not a JSON object.
    #[error("Invalid JSON")]
    InvalidFormat,
    /// A required booking field is absent or falsy.
    #[error("Missing data!")]
    MissingFields,
    #[error("failed to save data: {0}")]
    StorageWrite(String),
}

impl ServiceError {
    pub fn storage_write(op: &str, e: impl std::fmt::Display) -> Self {
        Self::StorageWrite(format!("{op}: {e}"))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFormat | Self::MissingFields)
    }
}
