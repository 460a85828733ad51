//! Error types for the analysis core.
//!
//! The analysis path itself never fails on strange input; classification,
//! extraction, segmentation, and linking all degrade to safe defaults. The
//! only fallible operations are at the edges, loading an entity registry
//! from disk or JSON.

use thiserror::Error;

/// Errors raised while loading reference data.
#[derive(Error, Debug)]
pub enum FolioError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry content is structurally valid JSON but unusable.
    #[error("Registry error: {0}")]
    Registry(String),
}

/// Type alias for [`Result<T, FolioError>`].
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing registry");
        let err: FolioError = io_err.into();
        match err {
            FolioError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: FolioError = json_err.into();
        assert!(matches!(err, FolioError::Json(_)));
    }

    #[test]
    fn test_registry_error_display() {
        let err = FolioError::Registry("no display name on person p-1".to_string());
        assert_eq!(format!("{err}"), "Registry error: no display name on person p-1");
    }
}
