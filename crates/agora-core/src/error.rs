//! Error types for Agora

use thiserror::Error;

/// Main error type for Agora operations
///
/// Reading content for display never surfaces these: the store adapter folds
/// every failure into the empty-list fallback. They only escape from store
/// construction, store writes and configuration loading.
#[derive(Error, Debug)]
pub enum ContentError {
    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem watcher could not be started or failed
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Store key is empty or would escape the store directory
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias using ContentError
pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContentError::InvalidKey("../escape".to_string());
        assert_eq!(format!("{}", err), "Invalid store key: \"../escape\"");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ContentError = io_err.into();
        assert!(matches!(err, ContentError::Io(_)));
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: ContentError = serde_err.into();
        assert!(matches!(err, ContentError::Serialization(_)));
    }
}
