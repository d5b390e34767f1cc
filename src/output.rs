//! The module responsible for writing results to disk.
use crate::impact::EnergyResults;
use crate::retrofit::{EvaluatedRetrofit, RetrofitID, RetrofitSelection, RetrofitTotals};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::Path;

/// The output file name for the building's energy profile
const ENERGY_RESULTS_FILE_NAME: &str = "energy_results.csv";

/// The output file name for applicable retrofit measures
const RETROFITS_FILE_NAME: &str = "retrofits.csv";

/// The output file name for the totals over selected retrofit measures
const RETROFIT_TOTALS_FILE_NAME: &str = "retrofit_totals.csv";

/// Create a new output directory.
///
/// Returns whether an existing directory is being overwritten.
///
/// # Arguments
///
/// * `output_dir` - Path to the directory
/// * `allow_overwrite` - Whether to replace the contents of an existing, non-empty directory
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if output_dir.is_dir() {
        let is_empty = output_dir.read_dir()?.next().is_none();
        ensure!(
            is_empty || allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace it."
        );

        if !is_empty {
            fs::remove_dir_all(output_dir)?;
        }
        !is_empty
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents the single row of the energy results CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct EnergyResultsRow {
    annual_energy_usage_kwh: f64,
    annual_co2_kg: f64,
    annual_cost: f64,
}

impl EnergyResultsRow {
    fn new(results: &EnergyResults) -> Self {
        Self {
            annual_energy_usage_kwh: results.annual_energy_usage.value(),
            annual_co2_kg: results.annual_co2_emissions.value(),
            annual_cost: results.annual_energy_cost.value(),
        }
    }
}

/// Represents a row in the retrofits CSV file.
///
/// A payback period which is never reached is written as an empty field.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct RetrofitRow {
    retrofit_id: RetrofitID,
    name: String,
    selected: bool,
    cost: f64,
    energy_savings_kwh: f64,
    co2_savings_kg: f64,
    cost_savings: f64,
    payback_years: Option<f64>,
    value_increase: f64,
    lifespan_years: u32,
}

impl RetrofitRow {
    fn new(retrofit: &EvaluatedRetrofit, selection: &RetrofitSelection) -> Self {
        Self {
            retrofit_id: retrofit.id(),
            name: retrofit.definition.name.to_string(),
            selected: selection.contains(retrofit.id()),
            cost: retrofit.cost.value(),
            energy_savings_kwh: retrofit.energy_savings.value(),
            co2_savings_kg: retrofit.co2_savings.value(),
            cost_savings: retrofit.cost_savings.value(),
            payback_years: retrofit.payback.map(|years| years.value()),
            value_increase: retrofit.value_increase.value(),
            lifespan_years: retrofit.definition.lifespan,
        }
    }
}

/// Represents the single row of the retrofit totals CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct RetrofitTotalsRow {
    total_cost: f64,
    total_energy_savings_kwh: f64,
    total_co2_savings_kg: f64,
    total_cost_savings: f64,
    total_value_increase: f64,
    average_payback_years: Option<f64>,
}

impl RetrofitTotalsRow {
    fn new(totals: &RetrofitTotals) -> Self {
        Self {
            total_cost: totals.cost.value(),
            total_energy_savings_kwh: totals.energy_savings.value(),
            total_co2_savings_kg: totals.co2_savings.value(),
            total_cost_savings: totals.cost_savings.value(),
            total_value_increase: totals.value_increase.value(),
            average_payback_years: totals.average_payback.map(|years| years.value()),
        }
    }
}

/// An object for writing calculation results to CSV files
pub struct DataWriter {
    results_writer: csv::Writer<File>,
    retrofits_writer: csv::Writer<File>,
    totals_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(&file_path)
                .with_context(|| format!("Failed to create {}", file_path.display()))
        };

        Ok(Self {
            results_writer: new_writer(ENERGY_RESULTS_FILE_NAME)?,
            retrofits_writer: new_writer(RETROFITS_FILE_NAME)?,
            totals_writer: new_writer(RETROFIT_TOTALS_FILE_NAME)?,
        })
    }

    /// Write the energy profile to a CSV file
    pub fn write_results(&mut self, results: &EnergyResults) -> Result<()> {
        self.results_writer
            .serialize(EnergyResultsRow::new(results))?;

        Ok(())
    }

    /// Write applicable retrofit measures to a CSV file
    pub fn write_retrofits(
        &mut self,
        retrofits: &[EvaluatedRetrofit],
        selection: &RetrofitSelection,
    ) -> Result<()> {
        for retrofit in retrofits {
            self.retrofits_writer
                .serialize(RetrofitRow::new(retrofit, selection))?;
        }

        Ok(())
    }

    /// Write totals for the selected retrofit measures to a CSV file.
    ///
    /// If nothing is selected, the file only contains a header.
    pub fn write_totals(&mut self, totals: Option<&RetrofitTotals>) -> Result<()> {
        match totals {
            Some(totals) => self.totals_writer.serialize(RetrofitTotalsRow::new(totals))?,
            None => self.totals_writer.write_record([
                "total_cost",
                "total_energy_savings_kwh",
                "total_co2_savings_kg",
                "total_cost_savings",
                "total_value_increase",
                "average_payback_years",
            ])?,
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.results_writer.flush()?;
        self.retrofits_writer.flush()?;
        self.totals_writer.flush()?;

        Ok(())
    }
}
