//! Common functionality for EcoRetrofit, a calculator for estimating a building's energy use and
//! appraising retrofit measures.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod building;
pub mod cli;
pub mod format;
pub mod impact;
pub mod input;
pub mod log;
pub mod output;
pub mod report;
pub mod retrofit;
pub mod session;
pub mod settings;
pub mod units;
pub mod usage;

#[cfg(test)]
mod fixture;

/// Get the directory where the program's configuration files are stored
pub fn get_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("ecoretrofit");

    path
}
