//! Helpers for presenting results to the user.
use crate::units::{Dimensionless, Years};

/// Text shown in place of a payback period which is never reached
pub const NOT_APPLICABLE: &str = "N/A";

/// Round to the nearest integer and group the digits in thousands, e.g. `37,112`
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Format an amount of money with a currency prefix, e.g. `$2,969`
pub fn currency(symbol: &str, value: f64) -> String {
    let grouped = group_thousands(value);
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-{symbol}{magnitude}"),
        None => format!("{symbol}{grouped}"),
    }
}

/// Format a payback period to one decimal place
pub fn payback(years: Option<Years>) -> String {
    match years {
        Some(years) => format!("{:.1} years", years.value()),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Format a percentage as a whole number, e.g. `60%`
pub fn percent(value: Option<Dimensionless>) -> String {
    match value {
        Some(value) => format!("{}%", group_thousands(value.value())),
        None => NOT_APPLICABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(37_112.4, "37,112")]
    #[case(1_234_567.0, "1,234,567")]
    #[case(-4500.0, "-4,500")]
    #[case(-0.2, "0")]
    fn test_group_thousands(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(group_thousands(value), expected);
    }

    #[rstest]
    #[case("$", 2969.0, "$2,969")]
    #[case("€", 12_000.0, "€12,000")]
    #[case("$", -25.0, "-$25")]
    fn test_currency(#[case] symbol: &str, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(currency(symbol, value), expected);
    }

    #[rstest]
    #[case(Some(Years(7.578)), "7.6 years")]
    #[case(Some(Years(0.0)), "0.0 years")]
    #[case(None, "N/A")]
    fn test_payback(#[case] years: Option<Years>, #[case] expected: &str) {
        assert_eq!(payback(years), expected);
    }

    #[rstest]
    #[case(Some(Dimensionless(60.0)), "60%")]
    #[case(Some(Dimensionless(165.29)), "165%")]
    #[case(None, "N/A")]
    fn test_percent(#[case] value: Option<Dimensionless>, #[case] expected: &str) {
        assert_eq!(percent(value), expected);
    }
}
