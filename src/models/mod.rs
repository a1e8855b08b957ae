//! Data models for `SustainEarth`
//!
//! - Emissions: carbon calculator inputs and results
//! - Air quality: AQI readings and derived results

pub mod air_quality;
pub mod emissions;

// Re-export all public types for convenient access
pub use air_quality::{AqiReading, AqiResult, Pollutants};
pub use emissions::{
    Diet, EmissionsBreakdown, EmissionsInput, EmissionsResult, EnergySource, FlightCounts,
    FootprintAssessment, Home, HomeSize, Lifestyle, ShoppingHabit, Transportation, VehicleType,
};
