//! `SustainEarth` - carbon footprint estimation and air quality lookup
//!
//! This library provides the two calculations behind the SustainEarth
//! website (the carbon calculator and the AQI tracker), the client for the
//! AQI endpoint, and the JSON API that exposes both.

pub mod api;
pub mod aqi;
pub mod config;
pub mod emissions;
pub mod error;
pub mod logging;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use aqi::{AqiCategory, AqiClient, AqiSource};
pub use config::SustainEarthConfig;
pub use emissions::estimate;
pub use error::SustainEarthError;
pub use models::{AqiReading, AqiResult, EmissionsInput, EmissionsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SustainEarthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
