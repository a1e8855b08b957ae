//! Carbon footprint estimation
//!
//! A fixed, simplified model: every source is a product of the user's
//! inputs and a constant emission factor. Inputs are not validated, so
//! nonsensical values (negative miles, recycling above 100 %) carry straight
//! through into the estimate.

use tracing::{debug, instrument};

use crate::models::emissions::{
    Diet, EmissionsBreakdown, EmissionsInput, EmissionsResult, EnergySource, FlightCounts,
    FootprintAssessment, Home, HomeSize, Lifestyle, ShoppingHabit, Transportation, VehicleType,
};

/// Footprint of an average person, kg CO2e/year
pub const AVERAGE_FOOTPRINT_KG: i64 = 8_000;

const TRANSIT_KG_PER_MILE: f64 = 0.15;
const SHORT_FLIGHT_KG: f64 = 500.0;
const MEDIUM_FLIGHT_KG: f64 = 1_500.0;
const LONG_FLIGHT_KG: f64 = 4_000.0;
const GAS_KG_PER_THERM: f64 = 5.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const LIFESTYLE_BASELINE_KG: f64 = 1_000.0;
/// Fraction of the lifestyle baseline removed by recycling everything
const MAX_RECYCLING_REDUCTION: f64 = 0.3;

impl VehicleType {
    /// kg CO2e per mile driven
    #[must_use]
    pub fn kg_per_mile(&self) -> f64 {
        match self {
            VehicleType::Electric => 0.1,
            VehicleType::Hybrid => 0.2,
            VehicleType::Gasoline => 0.4,
        }
    }
}

impl EnergySource {
    /// kg CO2e per kWh
    #[must_use]
    pub fn kg_per_kwh(&self) -> f64 {
        match self {
            EnergySource::Renewable => 0.1,
            EnergySource::Mixed => 0.3,
            EnergySource::Grid => 0.5,
        }
    }
}

impl HomeSize {
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            HomeSize::Small => 0.7,
            HomeSize::Medium => 1.0,
            HomeSize::Large => 1.5,
        }
    }
}

impl Diet {
    #[must_use]
    pub fn factor(&self) -> f64 {
        match self {
            Diet::Vegan => 0.5,
            Diet::Vegetarian => 0.8,
            Diet::Pescatarian => 1.1,
            Diet::Omnivore => 1.5,
        }
    }
}

impl ShoppingHabit {
    #[must_use]
    pub fn factor(&self) -> f64 {
        match self {
            ShoppingHabit::Minimal => 0.6,
            ShoppingHabit::Average => 1.0,
            ShoppingHabit::Frequent => 1.5,
        }
    }
}

impl FootprintAssessment {
    /// Compare a rounded annual total with the average person's footprint
    #[must_use]
    pub fn from_total(total_kg: i64) -> Self {
        if total_kg > 10_000 {
            FootprintAssessment::HigherThanAverage
        } else if total_kg > 5_000 {
            FootprintAssessment::AroundAverage
        } else {
            FootprintAssessment::LowerThanAverage
        }
    }
}

/// Estimate the annual footprint for the given inputs. Never fails.
#[instrument(level = "debug", skip(input))]
#[must_use]
pub fn estimate(input: &EmissionsInput) -> EmissionsResult {
    let breakdown = breakdown(input);
    let total_kg_co2e = round_half_up(breakdown.sum()) as i64;

    debug!(?breakdown, total_kg_co2e, "Estimated carbon footprint");

    EmissionsResult {
        total_kg_co2e,
        breakdown,
        assessment: FootprintAssessment::from_total(total_kg_co2e),
    }
}

/// Round to the nearest integer with halves going towards positive infinity,
/// so -0.5 becomes 0 and 2.5 becomes 3.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Unrounded per-source emissions
#[must_use]
pub fn breakdown(input: &EmissionsInput) -> EmissionsBreakdown {
    let transportation = &input.transportation;
    EmissionsBreakdown {
        vehicle: vehicle_emissions(transportation),
        transit: transportation.public_transit_miles * TRANSIT_KG_PER_MILE,
        flights: flight_emissions(&transportation.flights),
        home: home_emissions(&input.home),
        lifestyle: lifestyle_emissions(&input.lifestyle),
    }
}

fn vehicle_emissions(transportation: &Transportation) -> f64 {
    transportation.miles_driven * transportation.vehicle_type.kg_per_mile()
}

fn flight_emissions(flights: &FlightCounts) -> f64 {
    f64::from(flights.short) * SHORT_FLIGHT_KG
        + f64::from(flights.medium) * MEDIUM_FLIGHT_KG
        + f64::from(flights.long) * LONG_FLIGHT_KG
}

/// Household energy split across its occupants. An occupant count of zero
/// is treated as a household of one.
fn home_emissions(home: &Home) -> f64 {
    let electricity =
        home.monthly_electricity_kwh * home.energy_source.kg_per_kwh() * MONTHS_PER_YEAR;
    let gas = home.monthly_gas_therms * GAS_KG_PER_THERM * MONTHS_PER_YEAR;
    let occupants = f64::from(home.occupants.max(1));

    (electricity + gas) * home.home_size.multiplier() / occupants
}

fn lifestyle_emissions(lifestyle: &Lifestyle) -> f64 {
    let recycling_reduction = lifestyle.recycling_percent / 100.0 * MAX_RECYCLING_REDUCTION;
    LIFESTYLE_BASELINE_KG
        * lifestyle.diet.factor()
        * lifestyle.shopping.factor()
        * (1.0 - recycling_reduction)
}
