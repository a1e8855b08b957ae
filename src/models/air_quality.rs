//! Air quality reading model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aqi::AqiCategory;

/// Top of the AQI scale used for the gauge position
pub const AQI_SCALE_MAX: f64 = 500.0;

/// Pollutant concentrations reported alongside an AQI value.
/// Stations do not always report every pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Pollutants {
    /// Fine particulate matter in µg/m³
    #[serde(default)]
    pub pm25: Option<f64>,
    /// Coarse particulate matter in µg/m³
    #[serde(default)]
    pub pm10: Option<f64>,
    /// Ozone in ppb
    #[serde(default)]
    pub o3: Option<f64>,
    /// Nitrogen dioxide in ppb
    #[serde(default)]
    pub no2: Option<f64>,
}

impl Pollutants {
    /// Label and formatted value for each pollutant, a dash when unreported
    #[must_use]
    pub fn display_rows(&self) -> [(&'static str, String); 4] {
        [
            ("PM2.5", format_measurement(self.pm25, "µg/m³")),
            ("PM10", format_measurement(self.pm10, "µg/m³")),
            ("O3", format_measurement(self.o3, "ppb")),
            ("NO2", format_measurement(self.no2, "ppb")),
        ]
    }
}

fn format_measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => "-".to_string(),
    }
}

/// Raw reading as returned by the AQI endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    /// Location label, echoed from the query
    pub location: String,
    /// Air quality index, nominally 0-500 but not validated
    pub aqi: f64,
    #[serde(default)]
    pub pollutants: Pollutants,
}

/// A reading together with everything derived from its AQI value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiResult {
    #[serde(flatten)]
    pub reading: AqiReading,
    pub category: AqiCategory,
    pub advisory: String,
    /// Position on the 0-500 scale as a percentage, clamped to 0-100
    pub scale_percent: f64,
    /// When this reading was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl AqiResult {
    /// Derive category, advisory and gauge position from a reading
    #[must_use]
    pub fn from_reading(reading: AqiReading) -> Self {
        let category = AqiCategory::from_aqi(reading.aqi);
        let scale_percent = (reading.aqi / AQI_SCALE_MAX * 100.0).clamp(0.0, 100.0);
        Self {
            category,
            advisory: category.advisory().to_string(),
            scale_percent,
            retrieved_at: Utc::now(),
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(aqi: f64) -> AqiReading {
        AqiReading {
            location: "Bengaluru".to_string(),
            aqi,
            pollutants: Pollutants::default(),
        }
    }

    #[test]
    fn test_result_derives_category_and_advisory() {
        let result = AqiResult::from_reading(reading(125.0));
        assert_eq!(result.category, AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(result.advisory, AqiCategory::UnhealthyForSensitiveGroups.advisory());
        assert_eq!(result.scale_percent, 25.0);
    }

    #[test]
    fn test_scale_percent_is_clamped() {
        assert_eq!(AqiResult::from_reading(reading(750.0)).scale_percent, 100.0);
        assert_eq!(AqiResult::from_reading(reading(-10.0)).scale_percent, 0.0);
    }

    #[test]
    fn test_reading_ignores_extra_fields_and_missing_pollutants() {
        let json = r#"{
            "location": "Delhi",
            "aqi": 187.0,
            "category": "Moderate",
            "pollutants": { "pm25": 13.0, "pm10": 296.0, "o3": null },
            "healthImpactScore": 41.2,
            "healthImpactClass": "Moderate Impact Risk"
        }"#;
        let reading: AqiReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.aqi, 187.0);
        assert_eq!(reading.pollutants.pm25, Some(13.0));
        assert_eq!(reading.pollutants.o3, None);
        assert_eq!(reading.pollutants.no2, None);
    }

    #[test]
    fn test_result_serializes_flat() {
        let value = serde_json::to_value(AqiResult::from_reading(reading(42.0))).unwrap();
        assert_eq!(value["location"], "Bengaluru");
        assert_eq!(value["aqi"], 42.0);
        assert_eq!(value["category"], "Good");
        assert!(value["retrieved_at"].is_string());
    }

    #[test]
    fn test_pollutant_display_rows() {
        let pollutants = Pollutants {
            pm25: Some(12.34),
            no2: Some(21.5),
            ..Pollutants::default()
        };
        let rows = pollutants.display_rows();
        assert_eq!(rows[0], ("PM2.5", "12.3 µg/m³".to_string()));
        assert_eq!(rows[1], ("PM10", "-".to_string()));
        assert_eq!(rows[2], ("O3", "-".to_string()));
        assert_eq!(rows[3], ("NO2", "21.5 ppb".to_string()));
    }

    #[test]
    fn test_null_aqi_is_rejected() {
        // a station without an index value is not a reading
        let json = r#"{"location": "Delhi", "aqi": null, "pollutants": {"pm25": 13.0}}"#;
        assert!(serde_json::from_str::<AqiReading>(json).is_err());

        let json = r#"{"location": "Delhi", "pollutants": {}}"#;
        assert!(serde_json::from_str::<AqiReading>(json).is_err());
    }
}
