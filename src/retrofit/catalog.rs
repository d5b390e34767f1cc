//! The fixed catalog of retrofit measures.
use super::{Applicability, CostFormula, RetrofitDefinition, RetrofitID};
use crate::building::{HeatingSystem, InsulationQuality, WindowType};
use crate::units::{Dimensionless, Money, MoneyPerArea};

/// Every retrofit measure the calculator knows about, in display order
pub static RETROFIT_CATALOG: [RetrofitDefinition; 5] = [
    RetrofitDefinition {
        id: RetrofitID(1),
        name: "Roof Insulation Upgrade",
        description: "Add additional insulation to roof/attic",
        applicability: Applicability::UnlessInsulation(InsulationQuality::Good),
        cost: CostFormula::PerAreaByRoof {
            pitched: MoneyPerArea::new(35.0),
            flat: MoneyPerArea::new(40.0),
        },
        energy_savings_percent: Dimensionless::new(15.0),
        co2_reduction_percent: Dimensionless::new(15.0),
        value_increase: MoneyPerArea::new(10.0),
        lifespan: 30,
    },
    RetrofitDefinition {
        id: RetrofitID(2),
        name: "Wall Insulation",
        description: "Add external or cavity wall insulation",
        applicability: Applicability::UnlessInsulation(InsulationQuality::Good),
        cost: CostFormula::PerArea(MoneyPerArea::new(60.0)),
        energy_savings_percent: Dimensionless::new(25.0),
        co2_reduction_percent: Dimensionless::new(25.0),
        value_increase: MoneyPerArea::new(15.0),
        lifespan: 30,
    },
    RetrofitDefinition {
        id: RetrofitID(3),
        name: "Window Replacement",
        description: "Replace with high-efficiency double or triple glazing",
        applicability: Applicability::UnlessWindows(WindowType::Triple),
        cost: CostFormula::PerArea(MoneyPerArea::new(80.0)),
        energy_savings_percent: Dimensionless::new(10.0),
        co2_reduction_percent: Dimensionless::new(10.0),
        value_increase: MoneyPerArea::new(20.0),
        lifespan: 25,
    },
    RetrofitDefinition {
        id: RetrofitID(4),
        name: "Heat Pump Installation",
        description: "Replace conventional heating with air-source heat pump",
        applicability: Applicability::UnlessHeating(HeatingSystem::HeatPump),
        cost: CostFormula::FixedPlusPerArea {
            fixed: Money::new(8000.0),
            per_area: MoneyPerArea::new(10.0),
        },
        energy_savings_percent: Dimensionless::new(40.0),
        co2_reduction_percent: Dimensionless::new(60.0),
        value_increase: MoneyPerArea::new(30.0),
        lifespan: 20,
    },
    RetrofitDefinition {
        id: RetrofitID(5),
        name: "Solar Panel Installation",
        description: "Install rooftop solar PV system",
        applicability: Applicability::Always,
        // Half a panel per m², up to 100 panels
        cost: CostFormula::CappedUnits {
            units_per_area: 0.5,
            max_units: 100.0,
            cost_per_unit: Money::new(400.0),
        },
        energy_savings_percent: Dimensionless::new(30.0),
        co2_reduction_percent: Dimensionless::new(30.0),
        value_increase: MoneyPerArea::new(25.0),
        lifespan: 25,
    },
];

/// Look up a retrofit definition by ID
pub fn get_retrofit(id: RetrofitID) -> Option<&'static RetrofitDefinition> {
    RETROFIT_CATALOG.iter().find(|retrofit| retrofit.id == id)
}
