//! Integration tests for the `calculate` command.
use ecoretrofit::cli::{CalculateOpts, handle_calculate_command};
use ecoretrofit::log::is_logger_initialised;
use ecoretrofit::settings::Settings;
use std::fs;
use tempfile::tempdir;

fn get_settings() -> Settings {
    Settings {
        current_year: Some(2024),
        ..Settings::default()
    }
}

/// An integration test for the `calculate` command.
///
/// Steps are run in sequence because the logger can only be initialised once per process.
#[test]
fn test_handle_calculate_command() {
    unsafe { std::env::set_var("ECORETROFIT_LOG_LEVEL", "off") };
    assert!(!is_logger_initialised());

    let tempdir = tempdir().unwrap();
    let building_path = tempdir.path().join("building.toml");
    fs::write(
        &building_path,
        "floor_area = 120\nyear_built = 1960\nheating_system = \"oil\"\nroof_type = \"flat\"\n",
    )
    .unwrap();

    // Save results to non-existent directory to check that directory creation works
    let output_dir = tempdir.path().join("results");
    let opts = CalculateOpts {
        selected: vec![1, 4],
        output_dir: Some(output_dir.clone()),
        overwrite: false,
    };
    handle_calculate_command(Some(&building_path), &opts, Some(get_settings())).unwrap();
    assert!(is_logger_initialised());
    for file_name in [
        "energy_results.csv",
        "retrofits.csv",
        "retrofit_totals.csv",
        "ecoretrofit_info.log",
        "ecoretrofit_error.log",
    ] {
        assert!(output_dir.join(file_name).is_file(), "{file_name} missing");
    }
    let totals = fs::read_to_string(output_dir.join("retrofit_totals.csv")).unwrap();
    assert_eq!(totals.lines().count(), 2);

    // Output directory is no longer empty
    assert!(handle_calculate_command(None, &opts, Some(get_settings())).is_err());

    // ...unless overwriting is enabled
    let opts = CalculateOpts {
        overwrite: true,
        ..opts
    };
    handle_calculate_command(None, &opts, Some(get_settings())).unwrap();

    // Unknown retrofit IDs are rejected
    let opts = CalculateOpts {
        selected: vec![42],
        ..CalculateOpts::default()
    };
    assert_eq!(
        handle_calculate_command(None, &opts, Some(get_settings()))
            .unwrap_err()
            .to_string(),
        "Unknown retrofit ID: 42"
    );

    // Invalid building files are rejected
    fs::write(&building_path, "floor_area = 0\n").unwrap();
    assert_eq!(
        handle_calculate_command(
            Some(&building_path),
            &CalculateOpts::default(),
            Some(get_settings())
        )
        .unwrap_err()
        .to_string(),
        "Failed to load building."
    );
}
