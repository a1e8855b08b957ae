//! Error types and handling for `SustainEarth`

use thiserror::Error;

/// Message shown for every failed air quality lookup, whatever the cause.
pub const AQI_FETCH_FAILED: &str = "Failed to fetch air quality data";

/// Message shown when an air quality lookup is attempted without a location.
pub const LOCATION_REQUIRED: &str = "Please enter a location";

/// Main error type for the `SustainEarth` crate
#[derive(Error, Debug)]
pub enum SustainEarthError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// AQI endpoint communication errors (network, status, body)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SustainEarthError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    ///
    /// API failures collapse into one generic message; the underlying cause
    /// only goes to the log.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SustainEarthError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            SustainEarthError::Api { .. } => AQI_FETCH_FAILED.to_string(),
            SustainEarthError::Validation { message } => message.clone(),
            SustainEarthError::Io { .. } => {
                "File operation failed. Please check the path and file permissions.".to_string()
            }
        }
    }
}
