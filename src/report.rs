//! Renders a session as a plain-text report.
use crate::format::{currency, group_thousands, payback, percent};
use crate::retrofit::RETROFIT_CATALOG;
use crate::session::Session;
use anyhow::Result;
use itertools::Itertools;
use std::io::Write;

/// Write the current energy profile, applicable retrofits and selected totals.
///
/// # Arguments
///
/// * `out` - Where to write the report
/// * `session` - The session to describe
/// * `currency_symbol` - Prefix for amounts of money
pub fn write_report<W: Write>(out: &mut W, session: &Session, currency_symbol: &str) -> Result<()> {
    let money = |value: f64| currency(currency_symbol, value);
    let results = session.results();

    writeln!(out, "Current energy profile")?;
    if session.is_stale() {
        writeln!(
            out,
            "  (out of date: building details have changed since the last calculation)"
        )?;
    }
    writeln!(
        out,
        "  Annual energy usage:  {} kWh",
        group_thousands(results.annual_energy_usage.value())
    )?;
    writeln!(
        out,
        "  Annual CO2 emissions: {} kg (equivalent to driving {} miles)",
        group_thousands(results.annual_co2_emissions.value()),
        group_thousands(results.driving_distance_equivalent())
    )?;
    writeln!(
        out,
        "  Annual energy cost:   {}",
        money(results.annual_energy_cost.value())
    )?;

    writeln!(out)?;
    writeln!(out, "Recommended retrofit measures")?;
    let applicable = session.applicable_retrofits();
    if applicable.is_empty() {
        writeln!(out, "  None")?;
    }
    for retrofit in &applicable {
        let mark = if session.selection().contains(retrofit.id()) {
            'x'
        } else {
            ' '
        };
        writeln!(
            out,
            "  [{mark}] {} {}: {}",
            retrofit.id(),
            retrofit.definition.name,
            retrofit.definition.description
        )?;
        writeln!(
            out,
            "        cost {}, saves {}/yr and {} kg CO2/yr, payback {}, value +{}",
            money(retrofit.cost.value()),
            money(retrofit.cost_savings.value()),
            group_thousands(retrofit.co2_savings.value()),
            payback(retrofit.payback),
            money(retrofit.value_increase.value())
        )?;
    }

    writeln!(out)?;
    let Some(totals) = session.totals() else {
        writeln!(out, "No retrofit measures selected")?;
        return Ok(());
    };
    let projected = totals.projected_results(results);
    let counted = session
        .selection()
        .iter()
        .filter(|id| applicable.iter().any(|retrofit| retrofit.id() == *id))
        .join(", ");
    writeln!(out, "Selected retrofit measures ({counted})")?;
    writeln!(out, "  Total investment:        {}", money(totals.cost.value()))?;
    writeln!(
        out,
        "  Annual energy savings:   {} kWh ({}/yr)",
        group_thousands(totals.energy_savings.value()),
        money(totals.cost_savings.value())
    )?;
    writeln!(
        out,
        "  Average payback:         {}",
        payback(totals.average_payback)
    )?;
    writeln!(
        out,
        "  Annual CO2 reduction:    {} kg ({})",
        group_thousands(totals.co2_savings.value()),
        percent(totals.co2_reduction_percent(results))
    )?;
    writeln!(
        out,
        "  Property value increase: {}",
        money(totals.value_increase.value())
    )?;
    writeln!(
        out,
        "  Return on investment:    {} (value increase plus 10 years of savings)",
        percent(Some(totals.return_on_investment_percent()))
    )?;
    writeln!(out, "  After retrofits:")?;
    writeln!(
        out,
        "    Annual energy usage:   {} kWh",
        group_thousands(projected.annual_energy_usage.value())
    )?;
    writeln!(
        out,
        "    Annual CO2 emissions:  {} kg",
        group_thousands(projected.annual_co2_emissions.value())
    )?;
    writeln!(
        out,
        "    Annual energy cost:    {}",
        money(projected.annual_energy_cost.value())
    )?;

    Ok(())
}

/// Write a summary of every measure in the catalog
pub fn write_catalog<W: Write>(out: &mut W) -> Result<()> {
    for retrofit in &RETROFIT_CATALOG {
        writeln!(
            out,
            "{} {}: {} (saves {}% energy, {}% CO2, lasts {} years)",
            retrofit.id,
            retrofit.name,
            retrofit.description,
            retrofit.energy_savings_percent,
            retrofit.co2_reduction_percent,
            retrofit.lifespan
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::BuildingAttributes;
    use crate::fixture::TEST_YEAR;
    use crate::retrofit::RetrofitID;
    use crate::units::Area;

    fn report(session: &Session) -> String {
        let mut out = Vec::new();
        write_report(&mut out, session, "$").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_default() {
        let text = report(&Session::new(TEST_YEAR));
        assert!(text.contains("Annual energy usage:  37,112 kWh"));
        assert!(text.contains("Annual CO2 emissions: 7,422 kg (equivalent to driving 44 miles)"));
        assert!(text.contains("Annual energy cost:   $2,969"));
        assert!(text.contains("[ ] 4 Heat Pump Installation"));
        assert!(text.contains("No retrofit measures selected"));
        assert!(!text.contains("out of date"));
    }

    #[test]
    fn test_report_with_selection() {
        let mut session = Session::new(TEST_YEAR);
        session.toggle_retrofit(RetrofitID(4)).unwrap();
        let text = report(&session);
        assert!(text.contains("[x] 4 Heat Pump Installation"));
        assert!(text.contains("Selected retrofit measures (4)"));
        assert!(text.contains("Total investment:        $9,000"));
        assert!(text.contains("Average payback:         7.6 years"));
        assert!(text.contains("Annual CO2 reduction:    4,453 kg (60%)"));
    }

    #[test]
    fn test_report_zero_emissions() {
        let attributes = BuildingAttributes {
            floor_area: Area(0.001),
            ..BuildingAttributes::default()
        };
        let mut session = Session::with_attributes(attributes, TEST_YEAR);
        session.toggle_retrofit(RetrofitID(4)).unwrap();
        let text = report(&session);
        assert!(text.contains("Annual energy usage:  0 kWh"));
        assert!(text.contains("Annual CO2 reduction:    0 kg (N/A)"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_report_selection_order() {
        let mut session = Session::new(TEST_YEAR);
        for id in [5, 2] {
            session.toggle_retrofit(RetrofitID(id)).unwrap();
        }
        assert!(report(&session).contains("Selected retrofit measures (5, 2)"));
    }

    #[test]
    fn test_report_stale() {
        let mut session = Session::new(TEST_YEAR);
        session.set_field("occupants", "5").unwrap();
        assert!(report(&session).contains("out of date"));
    }

    #[test]
    fn test_write_catalog() {
        let mut out = Vec::new();
        write_catalog(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), RETROFIT_CATALOG.len());
        assert!(text.starts_with("1 Roof Insulation Upgrade"));
    }
}
