//! Air quality index classification
//!
//! Maps an AQI value onto the six US EPA categories using inclusive upper
//! bounds, and provides the fixed health advisory for each category. The
//! HTTP client that fetches readings lives in [`client`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod client;

pub use client::{AqiClient, AqiSource};

/// AQI category, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "Hazardous")]
    Hazardous,
}

impl AqiCategory {
    /// All categories in ascending order of severity
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Classify an AQI value. Out-of-range values still classify:
    /// anything at or below 50 is Good and anything above 300 is Hazardous.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.upper_bound().is_some_and(|bound| aqi <= bound))
            .unwrap_or(AqiCategory::Hazardous)
    }

    /// Inclusive upper bound of the category; `None` for the open-ended top band
    #[must_use]
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            AqiCategory::Good => Some(50.0),
            AqiCategory::Moderate => Some(100.0),
            AqiCategory::UnhealthyForSensitiveGroups => Some(150.0),
            AqiCategory::Unhealthy => Some(200.0),
            AqiCategory::VeryUnhealthy => Some(300.0),
            AqiCategory::Hazardous => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Health advisory shown next to a reading
    #[must_use]
    pub fn advisory(&self) -> &'static str {
        match self {
            AqiCategory::Good => {
                "Air quality is considered satisfactory and air pollution poses little or no risk."
            }
            AqiCategory::Moderate => {
                "Air quality is acceptable; however, some pollutants may be a concern for a small number of people who are sensitive to air pollution."
            }
            AqiCategory::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects. The general public is not likely to be affected."
            }
            AqiCategory::Unhealthy => {
                "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects."
            }
            AqiCategory::VeryUnhealthy => {
                "Health warnings of emergency conditions. The entire population is more likely to be affected."
            }
            AqiCategory::Hazardous => {
                "Health alert: everyone may experience more serious health effects."
            }
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
