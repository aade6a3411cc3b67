//! Error types for slam-datasets

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Dataset reader error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Log file missing or unreadable
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        /// Path that could not be opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Compressed stream could not be initialized
    #[error("Failed to initialize decompression for {}: {source}", path.display())]
    Decompress {
        /// Path of the compressed log
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: std::io::Error,
    },

    /// Reader options out of range
    #[error("Invalid reader options: {0}")]
    InvalidOptions(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Reader or parser message
        message: String,
    },

    /// I/O error while streaming an opened log
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = Error::Open {
            path: PathBuf::from("/data/run4.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/run4.log"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_io_error_from() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
