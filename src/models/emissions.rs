//! Carbon calculator input and result records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SustainEarthError;

/// Kind of car driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Gasoline,
    Hybrid,
    Electric,
}

/// Where household electricity comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    #[default]
    Grid,
    Mixed,
    Renewable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HomeSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Vegan,
    Vegetarian,
    Pescatarian,
    #[default]
    Omnivore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingHabit {
    Minimal,
    #[default]
    Average,
    Frequent,
}

/// Number of flights taken per year, by duration class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlightCounts {
    /// Flights under 3 hours
    pub short: u32,
    /// Flights of 3 to 6 hours
    pub medium: u32,
    /// Flights over 6 hours
    pub long: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transportation {
    pub vehicle_type: VehicleType,
    /// Miles driven per year
    pub miles_driven: f64,
    /// Public transit miles per year
    pub public_transit_miles: f64,
    pub flights: FlightCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub energy_source: EnergySource,
    pub home_size: HomeSize,
    /// People sharing the household footprint
    pub occupants: u32,
    pub monthly_electricity_kwh: f64,
    pub monthly_gas_therms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub diet: Diet,
    pub shopping: ShoppingHabit,
    /// Share of household waste recycled, 0-100
    pub recycling_percent: f64,
}

/// Everything the carbon calculator asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmissionsInput {
    pub transportation: Transportation,
    pub home: Home,
    pub lifestyle: Lifestyle,
}

// The defaults mirror the calculator form's initial state.
impl Default for Transportation {
    fn default() -> Self {
        Self {
            vehicle_type: VehicleType::Gasoline,
            miles_driven: 10_000.0,
            public_transit_miles: 1_000.0,
            flights: FlightCounts::default(),
        }
    }
}

impl Default for Home {
    fn default() -> Self {
        Self {
            energy_source: EnergySource::Grid,
            home_size: HomeSize::Medium,
            occupants: 2,
            monthly_electricity_kwh: 500.0,
            monthly_gas_therms: 50.0,
        }
    }
}

impl Default for Lifestyle {
    fn default() -> Self {
        Self {
            diet: Diet::Omnivore,
            shopping: ShoppingHabit::Average,
            recycling_percent: 50.0,
        }
    }
}

/// Per-source emissions in kg CO2e/year, before rounding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EmissionsBreakdown {
    pub vehicle: f64,
    pub transit: f64,
    pub flights: f64,
    pub home: f64,
    pub lifestyle: f64,
}

impl EmissionsBreakdown {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.vehicle + self.transit + self.flights + self.home + self.lifestyle
    }
}

/// How a footprint compares with an average person's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintAssessment {
    HigherThanAverage,
    AroundAverage,
    LowerThanAverage,
}

impl FootprintAssessment {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            FootprintAssessment::HigherThanAverage => {
                "Your footprint is higher than average. Consider ways to reduce your impact."
            }
            FootprintAssessment::AroundAverage => {
                "Your footprint is around average. There's room for improvement!"
            }
            FootprintAssessment::LowerThanAverage => {
                "Your footprint is lower than average. Great job!"
            }
        }
    }
}

/// Annual footprint estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsResult {
    /// Rounded total, kg CO2e/year
    pub total_kg_co2e: i64,
    pub breakdown: EmissionsBreakdown,
    pub assessment: FootprintAssessment,
}

// Parses the lowercase names used in JSON and by the CLI flags.
macro_rules! impl_from_str {
    ($ty:ty, $what:literal, { $($name:literal => $variant:path),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = SustainEarthError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(SustainEarthError::validation(format!(
                        "Unknown {} '{}'. Must be one of: {}",
                        $what,
                        other,
                        [$($name),+].join(", ")
                    ))),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.write_str(name)
            }
        }
    };
}

impl_from_str!(VehicleType, "vehicle type", {
    "gasoline" => VehicleType::Gasoline,
    "hybrid" => VehicleType::Hybrid,
    "electric" => VehicleType::Electric,
});

impl_from_str!(EnergySource, "energy source", {
    "grid" => EnergySource::Grid,
    "mixed" => EnergySource::Mixed,
    "renewable" => EnergySource::Renewable,
});

impl_from_str!(HomeSize, "home size", {
    "small" => HomeSize::Small,
    "medium" => HomeSize::Medium,
    "large" => HomeSize::Large,
});

impl_from_str!(Diet, "diet", {
    "vegan" => Diet::Vegan,
    "vegetarian" => Diet::Vegetarian,
    "pescatarian" => Diet::Pescatarian,
    "omnivore" => Diet::Omnivore,
});

impl_from_str!(ShoppingHabit, "shopping habit", {
    "minimal" => ShoppingHabit::Minimal,
    "average" => ShoppingHabit::Average,
    "frequent" => ShoppingHabit::Frequent,
});
