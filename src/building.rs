//! Building attributes entered by the user and the factor tables derived from them.
use crate::input::{input_err_msg, read_toml};
use crate::units::{Area, Co2PerEnergy, Dimensionless, MoneyPerEnergy};
use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Quality of the building's thermal insulation
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InsulationQuality {
    /// Little or no insulation
    Poor,
    /// Insulation to a typical standard
    Average,
    /// Well insulated
    Good,
}

impl InsulationQuality {
    /// Multiplier applied to energy usage
    pub fn usage_factor(self) -> Dimensionless {
        match self {
            Self::Poor => Dimensionless(1.3),
            Self::Average => Dimensionless(1.0),
            Self::Good => Dimensionless(0.7),
        }
    }
}

/// The building's primary heating system
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HeatingSystem {
    /// Gas boiler
    Gas,
    /// Oil boiler
    Oil,
    /// Direct electric heating
    Electric,
    /// Electric heat pump
    HeatPump,
}

impl HeatingSystem {
    /// Multiplier applied to energy usage
    pub fn usage_factor(self) -> Dimensionless {
        match self {
            Self::Gas => Dimensionless(1.0),
            Self::Oil => Dimensionless(1.2),
            Self::Electric => Dimensionless(0.9),
            Self::HeatPump => Dimensionless(0.4),
        }
    }

    /// Emissions per kWh consumed
    ///
    /// The figure for electricity varies greatly between grids; this is a rough average.
    pub fn emission_factor(self) -> Co2PerEnergy {
        match self {
            Self::Gas => Co2PerEnergy(0.20),
            Self::Oil => Co2PerEnergy(0.27),
            Self::Electric => Co2PerEnergy(0.45),
            Self::HeatPump => Co2PerEnergy(0.15),
        }
    }

    /// Price per kWh consumed
    pub fn energy_price(self) -> MoneyPerEnergy {
        match self {
            Self::Gas => MoneyPerEnergy(0.08),
            Self::Oil => MoneyPerEnergy(0.09),
            Self::Electric => MoneyPerEnergy(0.15),
            Self::HeatPump => MoneyPerEnergy(0.13),
        }
    }
}

/// Type of glazing fitted to the building
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WindowType {
    /// Single glazing
    Single,
    /// Double glazing
    Double,
    /// Triple glazing
    Triple,
}

impl WindowType {
    /// Multiplier applied to energy usage
    pub fn usage_factor(self) -> Dimensionless {
        match self {
            Self::Single => Dimensionless(1.3),
            Self::Double => Dimensionless(1.0),
            Self::Triple => Dimensionless(0.8),
        }
    }
}

/// The climate in which the building is located
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ClimateZone {
    /// Cold climate
    Cold,
    /// Moderate climate
    Moderate,
    /// Warm climate
    Warm,
}

impl ClimateZone {
    /// Multiplier applied to energy usage
    pub fn usage_factor(self) -> Dimensionless {
        match self {
            Self::Cold => Dimensionless(1.3),
            Self::Moderate => Dimensionless(1.0),
            Self::Warm => Dimensionless(0.7),
        }
    }
}

/// Shape of the roof, which affects the cost of roof insulation
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoofType {
    /// Pitched roof
    Pitched,
    /// Flat roof
    Flat,
}

/// Construction of the external walls.
///
/// Recorded for completeness but not currently used by the model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WallType {
    /// Brick walls
    Brick,
    /// Concrete walls
    Concrete,
    /// Timber frame
    Wood,
}

/// The characteristics of a building, as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingAttributes {
    /// Heated floor area in m²
    pub floor_area: Area,
    /// Year of construction
    pub year_built: i32,
    /// Number of storeys (not used by the model)
    pub floors: u32,
    /// Insulation standard
    pub insulation: InsulationQuality,
    /// Heating system
    pub heating_system: HeatingSystem,
    /// Glazing type
    pub window_type: WindowType,
    /// Number of people living in the building
    pub occupants: u32,
    /// Local climate
    pub climate_zone: ClimateZone,
    /// Roof shape
    pub roof_type: RoofType,
    /// Wall construction (not used by the model)
    pub wall_type: WallType,
}

impl Default for BuildingAttributes {
    fn default() -> Self {
        Self {
            floor_area: Area(100.0),
            year_built: 1980,
            floors: 2,
            insulation: InsulationQuality::Poor,
            heating_system: HeatingSystem::Gas,
            window_type: WindowType::Single,
            occupants: 2,
            climate_zone: ClimateZone::Moderate,
            roof_type: RoofType::Pitched,
            wall_type: WallType::Brick,
        }
    }
}

/// Parse the value for a building field, mentioning the field in any error
fn parse_field<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {field}: {value:?}"))
}

impl BuildingAttributes {
    /// Read building attributes from a TOML file.
    ///
    /// Fields missing from the file take their default values.
    pub fn from_path(file_path: &Path) -> Result<Self> {
        let attributes: BuildingAttributes = read_toml(file_path)?;
        attributes
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(attributes)
    }

    /// Check that the attributes can be used for a calculation
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.floor_area.is_finite() && self.floor_area > Area(0.0),
            "floor_area must be a finite number greater than zero"
        );
        ensure!(self.floors > 0, "floors must be at least one");

        Ok(())
    }

    /// Update a single field from its textual form.
    ///
    /// Numeric fields must be integers. On error, the attributes are left unchanged.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match field {
            "floor_area" => {
                let area: u32 = parse_field(field, value)?;
                updated.floor_area = Area(area as f64);
            }
            "year_built" => updated.year_built = parse_field(field, value)?,
            "floors" => updated.floors = parse_field(field, value)?,
            "insulation" => updated.insulation = parse_field(field, value)?,
            "heating_system" => updated.heating_system = parse_field(field, value)?,
            "window_type" => updated.window_type = parse_field(field, value)?,
            "occupants" => updated.occupants = parse_field(field, value)?,
            "climate_zone" => updated.climate_zone = parse_field(field, value)?,
            "roof_type" => updated.roof_type = parse_field(field, value)?,
            "wall_type" => updated.wall_type = parse_field(field, value)?,
            unknown => bail!("Unknown building field: {unknown}"),
        }
        updated.validate()?;
        *self = updated;

        Ok(())
    }

    /// The contents of a `building.toml` file describing the default building
    pub fn default_file_contents() -> String {
        toml::to_string(&BuildingAttributes::default())
            .expect("Could not convert building attributes to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use strum::IntoEnumIterator;
    use tempfile::tempdir;

    #[rstest]
    #[case("poor", InsulationQuality::Poor)]
    #[case("average", InsulationQuality::Average)]
    #[case("good", InsulationQuality::Good)]
    fn test_insulation_from_str(#[case] label: &str, #[case] expected: InsulationQuality) {
        assert_eq!(label.parse::<InsulationQuality>().unwrap(), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[test]
    fn test_heat_pump_label() {
        assert_eq!(HeatingSystem::HeatPump.to_string(), "heat-pump");
        assert_eq!(
            "heat-pump".parse::<HeatingSystem>().unwrap(),
            HeatingSystem::HeatPump
        );
        assert!("heatpump".parse::<HeatingSystem>().is_err());
    }

    #[test]
    fn test_factor_tables_total() {
        for heating in HeatingSystem::iter() {
            assert!(heating.usage_factor().value() > 0.0);
            assert!(heating.emission_factor().value() > 0.0);
            assert!(heating.energy_price().value() > 0.0);
        }
        for insulation in InsulationQuality::iter() {
            assert!(insulation.usage_factor().value() > 0.0);
        }
        for window in WindowType::iter() {
            assert!(window.usage_factor().value() > 0.0);
        }
        for climate in ClimateZone::iter() {
            assert!(climate.usage_factor().value() > 0.0);
        }
    }

    #[rstest]
    #[case("floor_area", "250")]
    #[case("year_built", "1920")]
    #[case("floors", "3")]
    #[case("insulation", "good")]
    #[case("heating_system", "heat-pump")]
    #[case("window_type", "triple")]
    #[case("occupants", "0")]
    #[case("climate_zone", "cold")]
    #[case("roof_type", "flat")]
    #[case("wall_type", "wood")]
    fn test_set_field_valid(#[case] field: &str, #[case] value: &str) {
        let mut attributes = BuildingAttributes::default();
        attributes.set_field(field, value).unwrap();
        assert_ne!(attributes, BuildingAttributes::default());
    }

    #[test]
    fn test_set_field_values() {
        let mut attributes = BuildingAttributes::default();
        attributes.set_field("floor_area", " 120 ").unwrap();
        attributes.set_field("heating_system", "oil").unwrap();
        assert_eq!(attributes.floor_area, Area(120.0));
        assert_eq!(attributes.heating_system, HeatingSystem::Oil);
    }

    #[rstest]
    #[case("floor_area", "abc", "Invalid value for floor_area: \"abc\"")]
    #[case("floor_area", "12.5", "Invalid value for floor_area: \"12.5\"")]
    #[case("occupants", "-1", "Invalid value for occupants: \"-1\"")]
    #[case("insulation", "excellent", "Invalid value for insulation: \"excellent\"")]
    #[case("colour", "red", "Unknown building field: colour")]
    #[case(
        "floor_area",
        "0",
        "floor_area must be a finite number greater than zero"
    )]
    #[case("floors", "0", "floors must be at least one")]
    fn test_set_field_invalid(#[case] field: &str, #[case] value: &str, #[case] msg: &str) {
        let mut attributes = BuildingAttributes::default();
        assert_error!(attributes.set_field(field, value), msg);
        assert_eq!(attributes, BuildingAttributes::default());
    }

    #[test]
    fn test_from_path_partial_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("building.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "floor_area = 80.0\nheating_system = \"heat-pump\"").unwrap();
        }

        let attributes = BuildingAttributes::from_path(&file_path).unwrap();
        assert_eq!(
            attributes,
            BuildingAttributes {
                floor_area: Area(80.0),
                heating_system: HeatingSystem::HeatPump,
                ..BuildingAttributes::default()
            }
        );
    }

    #[test]
    fn test_from_path_unknown_label() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("building.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "window_type = \"quadruple\"").unwrap();
        }

        assert!(BuildingAttributes::from_path(&file_path).is_err());
    }

    #[test]
    fn test_from_path_invalid_area() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("building.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "floor_area = -5.0").unwrap();
        }

        assert!(BuildingAttributes::from_path(&file_path).is_err());
    }

    #[test]
    fn test_default_file_contents_round_trip() {
        let contents = BuildingAttributes::default_file_contents();
        let attributes: BuildingAttributes = toml::from_str(&contents).unwrap();
        assert_eq!(attributes, BuildingAttributes::default());
    }
}
