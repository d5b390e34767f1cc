//! Fixtures for tests

use crate::building::BuildingAttributes;
use crate::impact::EnergyResults;
use crate::retrofit::{EvaluatedRetrofit, RetrofitID, RetrofitSelection, evaluate_applicable};
use rstest::fixture;

/// The year used as "now" in tests, so results don't depend on the clock
pub const TEST_YEAR: i32 = 2024;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn default_building() -> BuildingAttributes {
    BuildingAttributes::default()
}

#[fixture]
pub fn default_results(default_building: BuildingAttributes) -> EnergyResults {
    EnergyResults::calculate(&default_building, TEST_YEAR)
}

#[fixture]
pub fn applicable_retrofits(
    default_building: BuildingAttributes,
    default_results: EnergyResults,
) -> Vec<EvaluatedRetrofit> {
    evaluate_applicable(&default_building, &default_results)
}

#[fixture]
pub fn selection() -> RetrofitSelection {
    [RetrofitID(2), RetrofitID(4)].into_iter().collect()
}
