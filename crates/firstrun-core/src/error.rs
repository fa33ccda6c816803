//! Error types for Firstrun
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for Firstrun operations
#[derive(Error, Debug)]
pub enum FirstrunError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider response body could not be decoded
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Requested series was not found (HTTP 404)
    #[error("Series not found: {0}")]
    NotFound(String),

    /// Required episode attribute was not present
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    /// Air date was present but not in `YYYY-MM-DD` form
    #[error("Invalid air date: {0}")]
    InvalidAirDate(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Malformed configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output could not be serialized or written
    #[error("Failed to write schedule: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type alias for Firstrun operations
pub type Result<T> = std::result::Result<T, FirstrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_decode() {
        let error = FirstrunError::Decode("unexpected token".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to decode provider response: unexpected token"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let error = FirstrunError::NotFound("The Blacklist".to_string());
        assert_eq!(error.to_string(), "Series not found: The Blacklist");
    }

    #[test]
    fn test_error_display_attribute_not_found() {
        let error = FirstrunError::AttributeNotFound("episodeName".to_string());
        assert_eq!(error.to_string(), "Attribute not found: episodeName");
    }

    #[test]
    fn test_error_display_invalid_air_date() {
        let error = FirstrunError::InvalidAirDate("03/14/2014".to_string());
        assert_eq!(error.to_string(), "Invalid air date: 03/14/2014");
    }

    #[test]
    fn test_error_display_invalid_config() {
        let error = FirstrunError::InvalidConfig("show names must be non-empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: show names must be non-empty"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let error = FirstrunError::from(io);
        let display = error.to_string();
        assert!(display.starts_with("Failed to read configuration:"));
        assert!(display.contains("locked"));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_err = toml::from_str::<toml::Value>("shows = [").unwrap_err();
        let error = FirstrunError::from(parse_err);
        assert!(error.to_string().starts_with("Malformed configuration:"));
    }
}
