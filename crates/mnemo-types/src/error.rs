//! Shared error types for mnemo.

use thiserror::Error;

/// Top-level error type for mnemo.
#[derive(Error, Debug)]
pub enum MnemoError {
    /// The backing storage could not be opened, read or written.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The requested subject, index or ordinal does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A malformed index or selector was supplied by the caller.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Alias for Result with MnemoError.
pub type MnemoResult<T> = Result<T, MnemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MnemoError::NotFound("nothing remembered about 'thing1'".to_string());
        assert_eq!(err.to_string(), "Not found: nothing remembered about 'thing1'");
    }
}
