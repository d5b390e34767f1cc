//! The state of a single calculator session.
//!
//! A session holds the building attributes being edited, the retrofit measures the user has
//! selected and the most recent calculation. Editing attributes does not recalculate: the
//! results are only refreshed by an explicit call to [`Session::calculate`], and
//! [`Session::is_stale`] reports whether the edits have moved on since then. Retrofit metrics
//! are always derived from the attributes used in the last calculation, so they agree with
//! the displayed results.
use crate::building::BuildingAttributes;
use crate::impact::EnergyResults;
use crate::retrofit::{
    EvaluatedRetrofit, RetrofitID, RetrofitSelection, RetrofitTotals, evaluate_applicable,
    get_retrofit,
};
use anyhow::{Context, Result};
use log::{debug, info, warn};

/// A set of results along with the attributes they were calculated from
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// The attributes used for the calculation
    pub attributes: BuildingAttributes,
    /// The resulting energy profile
    pub results: EnergyResults,
}

impl Calculation {
    /// Calculate results for a snapshot of the attributes
    fn new(attributes: &BuildingAttributes, current_year: i32) -> Self {
        Self {
            attributes: attributes.clone(),
            results: EnergyResults::calculate(attributes, current_year),
        }
    }
}

/// A calculator session
#[derive(Debug, Clone)]
pub struct Session {
    current_year: i32,
    attributes: BuildingAttributes,
    selection: RetrofitSelection,
    calculation: Calculation,
}

impl Session {
    /// Start a session with the default building, calculating its results straight away
    pub fn new(current_year: i32) -> Self {
        Self::with_attributes(BuildingAttributes::default(), current_year)
    }

    /// Start a session with the given building, calculating its results straight away
    pub fn with_attributes(attributes: BuildingAttributes, current_year: i32) -> Self {
        let calculation = Calculation::new(&attributes, current_year);
        Self {
            current_year,
            attributes,
            selection: RetrofitSelection::new(),
            calculation,
        }
    }

    /// The attributes being edited
    pub fn attributes(&self) -> &BuildingAttributes {
        &self.attributes
    }

    /// The selected retrofit measures
    pub fn selection(&self) -> &RetrofitSelection {
        &self.selection
    }

    /// The most recent calculation
    pub fn calculation(&self) -> &Calculation {
        &self.calculation
    }

    /// The results of the most recent calculation
    pub fn results(&self) -> &EnergyResults {
        &self.calculation.results
    }

    /// Whether the attributes have been edited since the last calculation
    pub fn is_stale(&self) -> bool {
        self.attributes != self.calculation.attributes
    }

    /// Update a building attribute from its textual form.
    ///
    /// The results are not recalculated.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        self.attributes.set_field(field, value)?;
        debug!("Set {field} to {value}");

        Ok(())
    }

    /// Select or deselect a retrofit measure.
    ///
    /// Returns whether the measure is selected afterwards.
    pub fn toggle_retrofit(&mut self, id: RetrofitID) -> Result<bool> {
        let retrofit = get_retrofit(id).with_context(|| format!("Unknown retrofit ID: {id}"))?;
        let selected = self.selection.toggle(id);
        if selected && !retrofit.is_applicable(&self.calculation.attributes) {
            warn!(
                "Retrofit '{}' does not apply to this building and will not count towards the \
                totals",
                retrofit.name
            );
        }

        Ok(selected)
    }

    /// Recalculate the results from the current attributes
    pub fn calculate(&mut self) -> &EnergyResults {
        self.calculation = Calculation::new(&self.attributes, self.current_year);
        &self.calculation.results
    }

    /// Restore the default building, clear the selection and recalculate
    pub fn reset(&mut self) {
        info!("Resetting to the default building");
        self.attributes = BuildingAttributes::default();
        self.selection.clear();
        self.calculate();
    }

    /// Retrofit measures which apply to the building in the last calculation
    pub fn applicable_retrofits(&self) -> Vec<EvaluatedRetrofit> {
        evaluate_applicable(&self.calculation.attributes, &self.calculation.results)
    }

    /// Totals for the selected measures, or `None` if no applicable measure is selected
    pub fn totals(&self) -> Option<RetrofitTotals> {
        RetrofitTotals::from_selection(&self.applicable_retrofits(), &self.selection)
    }
}
