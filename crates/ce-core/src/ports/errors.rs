use thiserror::Error;

/// Failures reported by an external store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be read or written, or access was refused.
    #[error("external store unavailable: {0}")]
    Unavailable(String),

    /// Metadata is present but the payload cannot be turned into text.
    #[error("external value is not text: {0}")]
    MalformedValue(String),

    /// The store does not provide this operation.
    #[error("operation not supported by external store: {0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}
