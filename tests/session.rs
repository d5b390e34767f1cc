//! Integration tests for the `session` command.
use ecoretrofit::cli::handle_session_command;
use ecoretrofit::settings::Settings;

/// Run a scripted session from start to finish
#[test]
fn test_handle_session_command() {
    unsafe { std::env::set_var("ECORETROFIT_LOG_LEVEL", "off") };

    let settings = Settings {
        currency_symbol: "£".to_string(),
        current_year: Some(2024),
        ..Settings::default()
    };
    let script = "\
toggle 4
set heating_system heat-pump
show
calculate
toggle 4
reset
quit
";
    let mut output = Vec::new();
    handle_session_command(&mut script.as_bytes(), &mut output, Some(settings)).unwrap();
    let output = String::from_utf8(output).unwrap();

    // Initial report for the default building
    assert!(output.contains("Annual energy cost:   £2,969"));
    assert!(output.contains("Selected retrofit 4"));
    assert!(output.contains("out of date"));

    // Once recalculated, a heat pump is no longer recommended
    let recalculated = output
        .split("Current energy profile")
        .nth(3)
        .unwrap();
    assert!(!recalculated.contains("Heat Pump Installation"));
    assert!(recalculated.contains("No retrofit measures selected"));

    // The measure is still selected, so toggling it deselects it
    assert!(output.contains("Deselected retrofit 4"));
}
