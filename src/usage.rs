//! Estimates annual energy usage from a building's attributes.
//!
//! The estimate starts from a fixed usage per m² of floor area and applies a chain of
//! multiplicative adjustments for age, insulation, heating system, glazing, climate and
//! occupancy.
use crate::building::BuildingAttributes;
use crate::units::{Dimensionless, Energy, EnergyPerArea};
use log::debug;

/// Baseline annual energy usage per m² of floor area
pub const BASE_USAGE_PER_AREA: EnergyPerArea = EnergyPerArea::new(150.0);

/// Increase in usage for each year of building age
const AGE_FACTOR_PER_YEAR: f64 = 0.005;

/// Lower bound for the age adjustment
pub const MIN_AGE_FACTOR: Dimensionless = Dimensionless::new(0.8);

/// Upper bound for the age adjustment
pub const MAX_AGE_FACTOR: Dimensionless = Dimensionless::new(1.5);

/// Increase in usage for each occupant
const OCCUPANCY_FACTOR_PER_PERSON: f64 = 0.1;

/// Adjustment for the age of the building.
///
/// Older buildings use more energy. The factor is clamped to [`MIN_AGE_FACTOR`] and
/// [`MAX_AGE_FACTOR`], so buildings with a construction year in the future are still handled.
pub fn age_factor(year_built: i32, current_year: i32) -> Dimensionless {
    let age = f64::from(current_year) - f64::from(year_built);
    Dimensionless(1.0 + age * AGE_FACTOR_PER_YEAR).clamp(MIN_AGE_FACTOR, MAX_AGE_FACTOR)
}

/// Adjustment for the number of occupants
pub fn occupancy_factor(occupants: u32) -> Dimensionless {
    Dimensionless(1.0 + f64::from(occupants) * OCCUPANCY_FACTOR_PER_PERSON)
}

/// Estimate annual energy usage in kWh, rounded to the nearest whole kWh.
///
/// # Arguments
///
/// * `attributes` - The building to estimate usage for
/// * `current_year` - Year used to calculate the building's age
pub fn annual_energy_usage(attributes: &BuildingAttributes, current_year: i32) -> Energy {
    let factors = [
        age_factor(attributes.year_built, current_year),
        attributes.insulation.usage_factor(),
        attributes.heating_system.usage_factor(),
        attributes.window_type.usage_factor(),
        attributes.climate_zone.usage_factor(),
        occupancy_factor(attributes.occupants),
    ];
    debug!("Energy usage adjustment factors: {factors:?}");

    let base = attributes.floor_area * BASE_USAGE_PER_AREA;
    factors
        .into_iter()
        .fold(base, |usage, factor| usage * factor)
        .round()
}
