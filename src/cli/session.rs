//! A line-oriented interactive calculator session.
//!
//! Each line of input is one command:
//!
//! * `set FIELD VALUE` - change a building attribute
//! * `toggle ID` - select or deselect a retrofit measure
//! * `calculate` - recalculate the results
//! * `reset` - restore the default building and clear the selection
//! * `show` - print the report
//! * `fields` - list the building attributes
//! * `help` - list the commands
//! * `quit` - end the session
use crate::report::write_report;
use crate::retrofit::RetrofitID;
use crate::session::Session;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

const HELP: &str = "Commands:
  set FIELD VALUE   change a building attribute
  toggle ID         select or deselect a retrofit measure
  calculate         recalculate the results
  reset             restore the default building and clear the selection
  show              print the report
  fields            list the building attributes
  quit              end the session";

/// A parsed session command
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Set { field: &'a str, value: &'a str },
    Toggle(RetrofitID),
    Calculate,
    Reset,
    Show,
    Fields,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    /// Parse a line of input. Returns `None` for blank lines.
    fn parse(line: &'a str) -> Result<Option<Self>> {
        let line = line.trim();
        let Some((name, rest)) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .or_else(|| (!line.is_empty()).then_some((line, "")))
        else {
            return Ok(None);
        };

        let command = match (name, rest) {
            ("set", rest) => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .context("Usage: set FIELD VALUE")?;
                Command::Set {
                    field,
                    value: value.trim(),
                }
            }
            ("toggle", id) => {
                let id = id
                    .parse()
                    .with_context(|| format!("Invalid retrofit ID: {id:?}"))?;
                Command::Toggle(RetrofitID(id))
            }
            ("calculate", "") => Command::Calculate,
            ("reset", "") => Command::Reset,
            ("show", "") => Command::Show,
            ("fields", "") => Command::Fields,
            ("help", "") => Command::Help,
            ("quit" | "exit", "") => Command::Quit,
            _ => bail!("Unknown command: {line}. Type `help` for a list of commands."),
        };

        Ok(Some(command))
    }
}

/// Run commands from `input` against the session until `quit` or end of input.
///
/// Invalid commands are reported on `output` and do not end the session.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    session: &mut Session,
    currency_symbol: &str,
) -> Result<()> {
    write_report(output, session, currency_symbol)?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "Error: {err:#}")?;
                continue;
            }
        };

        match command {
            Command::Set { field, value } => match session.set_field(field, value) {
                Ok(()) => writeln!(output, "{field} = {value} (type `calculate` to update)")?,
                Err(err) => writeln!(output, "Error: {err:#}")?,
            },
            Command::Toggle(id) => match session.toggle_retrofit(id) {
                Ok(true) => writeln!(output, "Selected retrofit {id}")?,
                Ok(false) => writeln!(output, "Deselected retrofit {id}")?,
                Err(err) => writeln!(output, "Error: {err:#}")?,
            },
            Command::Calculate => {
                session.calculate();
                write_report(output, session, currency_symbol)?;
            }
            Command::Reset => {
                session.reset();
                write_report(output, session, currency_symbol)?;
            }
            Command::Show => write_report(output, session, currency_symbol)?,
            Command::Fields => {
                write!(output, "{}", toml::to_string(session.attributes())?)?;
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::BuildingAttributes;
    use crate::fixture::TEST_YEAR;
    use rstest::rstest;

    fn run_script(script: &str) -> (Session, String) {
        let mut session = Session::new(TEST_YEAR);
        let mut output = Vec::new();
        run(&mut script.as_bytes(), &mut output, &mut session, "$").unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("calculate", Some(Command::Calculate))]
    #[case("  reset  ", Some(Command::Reset))]
    #[case("toggle 3", Some(Command::Toggle(RetrofitID(3))))]
    #[case(
        "set heating_system heat-pump",
        Some(Command::Set { field: "heating_system", value: "heat-pump" })
    )]
    #[case("exit", Some(Command::Quit))]
    fn test_parse(#[case] line: &str, #[case] expected: Option<Command>) {
        assert_eq!(Command::parse(line).unwrap(), expected);
    }

    #[rstest]
    #[case("toggle")]
    #[case("toggle three")]
    #[case("set floors")]
    #[case("calculate now")]
    #[case("jump")]
    fn test_parse_invalid(#[case] line: &str) {
        assert!(Command::parse(line).is_err());
    }

    #[test]
    fn test_run_edits_then_calculates() {
        let (session, output) = run_script("set insulation good\nshow\ncalculate\n");
        assert!(!session.is_stale());
        assert!(output.contains("insulation = good (type `calculate` to update)"));
        assert!(output.contains("out of date"));
        assert!(session.results().annual_energy_usage.value() < 37_112.0);
    }

    #[test]
    fn test_run_reports_errors_and_continues() {
        let (session, output) = run_script("set floors none\ntoggle 99\ntoggle 2\n");
        assert!(output.contains("Error: Invalid value for floors"));
        assert!(output.contains("Error: Unknown retrofit ID: 99"));
        assert!(output.contains("Selected retrofit 2"));
        assert!(session.selection().contains(RetrofitID(2)));
    }

    #[test]
    fn test_run_reset() {
        let (session, _) = run_script("set floor_area 300\ntoggle 1\ncalculate\nreset\n");
        assert_eq!(*session.attributes(), BuildingAttributes::default());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_run_stops_at_quit() {
        let (session, _) = run_script("quit\nset floors 5\n");
        assert_eq!(session.attributes().floors, 2);
    }
}
