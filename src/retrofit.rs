//! Retrofit measures: which apply to a building, what they cost and what they save.
use crate::building::{BuildingAttributes, HeatingSystem, InsulationQuality, RoofType, WindowType};
use crate::impact::EnergyResults;
use crate::units::{Area, Co2, Dimensionless, Energy, Money, MoneyPerArea, MoneyPerYear, Years};
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub use catalog::{RETROFIT_CATALOG, get_retrofit};

/// Number of years of cost savings counted towards the return on investment
const RETURN_ON_INVESTMENT_YEARS: f64 = 10.0;

/// Identifies a retrofit measure in the catalog
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct RetrofitID(pub u32);

/// Rule for whether a retrofit measure is relevant to a building
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applicability {
    /// Applies unless the insulation is already of this quality
    UnlessInsulation(InsulationQuality),
    /// Applies unless this glazing is already fitted
    UnlessWindows(WindowType),
    /// Applies unless this heating system is already installed
    UnlessHeating(HeatingSystem),
    /// Applies to every building
    Always,
}

impl Applicability {
    /// Whether the rule holds for the given building
    pub fn is_applicable(&self, attributes: &BuildingAttributes) -> bool {
        match *self {
            Self::UnlessInsulation(quality) => attributes.insulation != quality,
            Self::UnlessWindows(window_type) => attributes.window_type != window_type,
            Self::UnlessHeating(heating_system) => attributes.heating_system != heating_system,
            Self::Always => true,
        }
    }
}

/// How the up-front cost of a retrofit measure is calculated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostFormula {
    /// A fixed cost per m² of floor area
    PerArea(MoneyPerArea),
    /// A cost per m² of floor area which depends on the roof shape
    PerAreaByRoof {
        /// Cost for pitched roofs
        pitched: MoneyPerArea,
        /// Cost for flat roofs
        flat: MoneyPerArea,
    },
    /// A fixed installation cost plus a cost per m²
    FixedPlusPerArea {
        /// Cost incurred regardless of size
        fixed: Money,
        /// Additional cost per m²
        per_area: MoneyPerArea,
    },
    /// A number of units proportional to floor area, up to a maximum, at a fixed unit price
    CappedUnits {
        /// Units required per m²
        units_per_area: f64,
        /// Most units that will be installed
        max_units: f64,
        /// Price of each unit
        cost_per_unit: Money,
    },
}

impl CostFormula {
    /// Evaluate the cost for the given building
    pub fn evaluate(&self, attributes: &BuildingAttributes) -> Money {
        let area = attributes.floor_area;
        match *self {
            Self::PerArea(rate) => area * rate,
            Self::PerAreaByRoof { pitched, flat } => match attributes.roof_type {
                RoofType::Pitched => area * pitched,
                RoofType::Flat => area * flat,
            },
            Self::FixedPlusPerArea { fixed, per_area } => fixed + area * per_area,
            Self::CappedUnits {
                units_per_area,
                max_units,
                cost_per_unit,
            } => {
                let units = (area.value() * units_per_area).min(max_units);
                cost_per_unit * Dimensionless(units)
            }
        }
    }
}

/// A retrofit measure in the catalog
#[derive(Debug, PartialEq)]
pub struct RetrofitDefinition {
    /// Unique identifier
    pub id: RetrofitID,
    /// Short name for display
    pub name: &'static str,
    /// Longer description
    pub description: &'static str,
    /// When the measure is relevant
    pub applicability: Applicability,
    /// Up-front cost of the measure
    pub cost: CostFormula,
    /// Percentage reduction in energy usage
    pub energy_savings_percent: Dimensionless,
    /// Percentage reduction in CO2 emissions
    pub co2_reduction_percent: Dimensionless,
    /// Increase in property value per m² of floor area
    pub value_increase: MoneyPerArea,
    /// Expected lifespan of the measure in years
    pub lifespan: u32,
}

impl RetrofitDefinition {
    /// Whether this measure applies to the given building
    pub fn is_applicable(&self, attributes: &BuildingAttributes) -> bool {
        self.applicability.is_applicable(attributes)
    }

    /// The increase in property value for the given building
    pub fn value_increase_for(&self, floor_area: Area) -> Money {
        floor_area * self.value_increase
    }

    /// Calculate the costs and savings of this measure for a building.
    ///
    /// # Arguments
    ///
    /// * `attributes` - The building the measure would be applied to
    /// * `results` - The current energy profile of that building
    pub fn evaluate(
        &'static self,
        attributes: &BuildingAttributes,
        results: &EnergyResults,
    ) -> EvaluatedRetrofit {
        let energy_fraction = self.energy_savings_percent / Dimensionless(100.0);
        let co2_fraction = self.co2_reduction_percent / Dimensionless(100.0);

        // Cost savings are scaled by the energy savings percentage; there is no separate
        // figure for cost
        let cost_savings = results.annual_energy_cost * energy_fraction;
        let cost = self.cost.evaluate(attributes);

        EvaluatedRetrofit {
            definition: self,
            energy_savings: results.annual_energy_usage * energy_fraction,
            co2_savings: results.annual_co2_emissions * co2_fraction,
            cost_savings,
            cost,
            payback: payback_period(cost, cost_savings),
            value_increase: self.value_increase_for(attributes.floor_area),
        }
    }
}

/// Years for savings to cover the cost.
///
/// Returns `None` if there are no savings, in which case the cost is never paid back.
pub fn payback_period(cost: Money, annual_savings: MoneyPerYear) -> Option<Years> {
    let years = cost / annual_savings;
    (annual_savings > MoneyPerYear(0.0) && years.is_finite()).then_some(years)
}

/// A retrofit measure with its costs and savings for a particular building
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedRetrofit {
    /// The catalog entry
    pub definition: &'static RetrofitDefinition,
    /// Annual energy saved in kWh
    pub energy_savings: Energy,
    /// Annual CO2 saved in kg
    pub co2_savings: Co2,
    /// Annual reduction in energy costs
    pub cost_savings: MoneyPerYear,
    /// Up-front cost
    pub cost: Money,
    /// Years to pay back the cost, if it is ever paid back
    pub payback: Option<Years>,
    /// Increase in property value
    pub value_increase: Money,
}

impl EvaluatedRetrofit {
    /// The ID of the underlying catalog entry
    pub fn id(&self) -> RetrofitID {
        self.definition.id
    }
}

/// Evaluate every catalog entry which applies to the building, in catalog order
pub fn evaluate_applicable(
    attributes: &BuildingAttributes,
    results: &EnergyResults,
) -> Vec<EvaluatedRetrofit> {
    RETROFIT_CATALOG
        .iter()
        .filter(|retrofit| {
            let applicable = retrofit.is_applicable(attributes);
            if !applicable {
                debug!("Retrofit '{}' is not applicable", retrofit.name);
            }
            applicable
        })
        .map(|retrofit| retrofit.evaluate(attributes, results))
        .collect()
}

/// The set of retrofit measures chosen by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrofitSelection(IndexSet<RetrofitID>);

impl RetrofitSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the ID if absent, otherwise remove it.
    ///
    /// Returns whether the ID is selected afterwards.
    pub fn toggle(&mut self, id: RetrofitID) -> bool {
        if self.0.shift_remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Whether the ID is selected
    pub fn contains(&self, id: RetrofitID) -> bool {
        self.0.contains(&id)
    }

    /// Remove all selected IDs
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the selected IDs
    pub fn iter(&self) -> impl Iterator<Item = RetrofitID> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RetrofitID> for RetrofitSelection {
    fn from_iter<I: IntoIterator<Item = RetrofitID>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Combined costs and savings for the selected retrofit measures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrofitTotals {
    /// Total up-front cost
    pub cost: Money,
    /// Total annual energy saved in kWh
    pub energy_savings: Energy,
    /// Total annual CO2 saved in kg
    pub co2_savings: Co2,
    /// Total annual reduction in energy costs
    pub cost_savings: MoneyPerYear,
    /// Total increase in property value
    pub value_increase: Money,
    /// Years to pay back the total cost, if it is ever paid back
    pub average_payback: Option<Years>,
}

impl RetrofitTotals {
    /// Sum the metrics for the measures which are both selected and applicable.
    ///
    /// Returns `None` if no applicable measure is selected. Selected IDs which are not among
    /// `applicable` are ignored.
    pub fn from_selection(
        applicable: &[EvaluatedRetrofit],
        selection: &RetrofitSelection,
    ) -> Option<Self> {
        let selected: Vec<_> = applicable
            .iter()
            .filter(|retrofit| selection.contains(retrofit.id()))
            .collect();
        if selected.is_empty() {
            return None;
        }

        let cost = selected.iter().map(|r| r.cost).sum();
        let cost_savings = selected.iter().map(|r| r.cost_savings).sum();
        Some(Self {
            cost,
            energy_savings: selected.iter().map(|r| r.energy_savings).sum(),
            co2_savings: selected.iter().map(|r| r.co2_savings).sum(),
            cost_savings,
            value_increase: selected.iter().map(|r| r.value_increase).sum(),
            average_payback: payback_period(cost, cost_savings),
        })
    }

    /// Total CO2 savings as a percentage of the building's current emissions.
    ///
    /// Returns `None` if the building has no emissions to reduce.
    pub fn co2_reduction_percent(&self, baseline: &EnergyResults) -> Option<Dimensionless> {
        (baseline.annual_co2_emissions > Co2(0.0))
            .then(|| self.co2_savings / baseline.annual_co2_emissions * Dimensionless(100.0))
    }

    /// Return on investment as a percentage, counting the value increase plus ten years of
    /// cost savings
    pub fn return_on_investment_percent(&self) -> Dimensionless {
        let savings = self.cost_savings * Dimensionless(RETURN_ON_INVESTMENT_YEARS);
        let returns = self.value_increase.value() + savings.value();
        Dimensionless(returns / self.cost.value() * 100.0)
    }

    /// The energy profile after the selected measures have been carried out.
    ///
    /// Savings percentages are added together, so the projection is floored at zero.
    pub fn projected_results(&self, baseline: &EnergyResults) -> EnergyResults {
        EnergyResults {
            annual_energy_usage: (baseline.annual_energy_usage - self.energy_savings)
                .max(Energy(0.0)),
            annual_co2_emissions: (baseline.annual_co2_emissions - self.co2_savings)
                .max(Co2(0.0)),
            annual_energy_cost: (baseline.annual_energy_cost - self.cost_savings)
                .max(MoneyPerYear(0.0)),
        }
    }
}
