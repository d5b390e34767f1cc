//! Converts annual energy usage into emissions and running costs.
use crate::building::{BuildingAttributes, HeatingSystem};
use crate::units::{Co2, Energy, MoneyPerYear};
use crate::usage::annual_energy_usage;
use log::info;
use serde::Serialize;

/// Divisor converting annual kg of CO2 into the "equivalent miles driven" figure
const DRIVING_EQUIVALENT_DIVISOR: Co2 = Co2::new(170.0);

/// Annual CO2 emissions in kg, rounded to the nearest whole kg
pub fn annual_co2_emissions(usage: Energy, heating_system: HeatingSystem) -> Co2 {
    (usage * heating_system.emission_factor()).round()
}

/// Annual energy cost, rounded to the nearest whole currency unit
pub fn annual_energy_cost(usage: Energy, heating_system: HeatingSystem) -> MoneyPerYear {
    (usage * heating_system.energy_price()).round()
}

/// The estimated energy profile of a building
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyResults {
    /// Annual energy usage in kWh
    pub annual_energy_usage: Energy,
    /// Annual CO2 emissions in kg
    pub annual_co2_emissions: Co2,
    /// Annual energy cost
    pub annual_energy_cost: MoneyPerYear,
}

impl EnergyResults {
    /// Calculate the energy profile for the given building.
    ///
    /// The results are always computed together from the same attributes.
    pub fn calculate(attributes: &BuildingAttributes, current_year: i32) -> Self {
        let annual_energy_usage = annual_energy_usage(attributes, current_year);
        let results = Self {
            annual_energy_usage,
            annual_co2_emissions: annual_co2_emissions(
                annual_energy_usage,
                attributes.heating_system,
            ),
            annual_energy_cost: annual_energy_cost(annual_energy_usage, attributes.heating_system),
        };
        info!(
            "Estimated usage: {} kWh, emissions: {} kg CO2, cost: {}",
            results.annual_energy_usage.value(),
            results.annual_co2_emissions.value(),
            results.annual_energy_cost.value()
        );

        results
    }

    /// Distance an average car would need to drive to emit the same CO2, in whole miles
    pub fn driving_distance_equivalent(&self) -> f64 {
        (self.annual_co2_emissions / DRIVING_EQUIVALENT_DIVISOR).value().round()
    }
}
