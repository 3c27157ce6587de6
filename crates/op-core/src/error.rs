//! Error types for the overlay-pad front-end

use thiserror::Error;

/// Persistence-layer errors
///
/// Callers on the touch event path treat these as best-effort: they are
/// logged and swallowed, never propagated back into event processing.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Deserialize error: {0}")]
    Deserialize(#[from] toml::de::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Overlapping button bits: 0x{0:04x}")]
    OverlappingBits(u32),
}

/// Result type alias for overlay-pad operations
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::OverlappingBits(0x0030);
        assert_eq!(format!("{}", err), "Overlapping button bits: 0x0030");
    }

    #[test]
    fn test_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
