//! The command line interface for the calculator.
use crate::building::BuildingAttributes;
use crate::log;
use crate::output::{DataWriter, create_output_directory};
use crate::report::{write_catalog, write_report};
use crate::retrofit::RetrofitID;
use crate::session::Session;
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub mod session;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the calculator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the calculate command
#[derive(Args, Default)]
pub struct CalculateOpts {
    /// ID of a retrofit measure to include in the totals (may be repeated)
    #[arg(short, long = "select", value_name = "ID")]
    pub selected: Vec<u32>,
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Estimate energy use for a building and appraise retrofit measures.
    Calculate {
        /// Path to a building TOML file. The default building is used if omitted.
        building_file: Option<PathBuf>,
        /// Other calculation options
        #[command(flatten)]
        opts: CalculateOpts,
    },
    /// List the available retrofit measures.
    Retrofits,
    /// Print a building TOML file describing the default building.
    Defaults,
    /// Start an interactive calculator session.
    Session,
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Calculate {
                building_file,
                opts,
            } => handle_calculate_command(building_file.as_deref(), &opts, None),
            Self::Retrofits => write_catalog(&mut io::stdout().lock()),
            Self::Defaults => {
                print!("{}", BuildingAttributes::default_file_contents());
                Ok(())
            }
            Self::Session => {
                let stdin = io::stdin();
                handle_session_command(&mut stdin.lock(), &mut io::stdout().lock(), None)
            }
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and run the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ ecoretrofit --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    if let Some(settings) = settings {
        Ok(settings)
    } else {
        Settings::load().context("Failed to load settings.")
    }
}

/// Initialise the program logger unless it has already been set up
fn init_logger(settings: &Settings, log_file_path: Option<&Path>) -> Result<()> {
    if log::is_logger_initialised() {
        return Ok(());
    }

    log::init(Some(settings.log_level.as_str()), log_file_path)
        .context("Failed to initialise logging.")
}

/// Handle the `calculate` command.
pub fn handle_calculate_command(
    building_file: Option<&Path>,
    opts: &CalculateOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;

    // Create the output folder before the logger, so that log files can be written to it
    let overwrite = match opts.output_dir.as_deref() {
        Some(output_path) => create_output_directory(
            output_path,
            opts.overwrite || settings.overwrite,
        )
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?,
        None => false,
    };
    init_logger(&settings, opts.output_dir.as_deref())?;

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let attributes = match building_file {
        Some(path) => {
            let attributes =
                BuildingAttributes::from_path(path).context("Failed to load building.")?;
            info!("Loaded building from {}", path.display());
            attributes
        }
        None => BuildingAttributes::default(),
    };

    let mut session = Session::with_attributes(attributes, settings.current_year());
    for id in &opts.selected {
        session.toggle_retrofit(RetrofitID(*id))?;
    }

    write_report(&mut io::stdout().lock(), &session, &settings.currency_symbol)?;

    if let Some(output_path) = opts.output_dir.as_deref() {
        let mut writer = DataWriter::create(output_path)?;
        writer.write_results(session.results())?;
        writer.write_retrofits(&session.applicable_retrofits(), session.selection())?;
        writer.write_totals(session.totals().as_ref())?;
        writer.flush()?;
        info!("Results written to {}", output_path.display());
    }

    Ok(())
}

/// Handle the `session` command, reading commands from `input` until it is exhausted.
pub fn handle_session_command<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;
    init_logger(&settings, None)?;

    let mut session = Session::new(settings.current_year());
    session::run(input, output, &mut session, &settings.currency_symbol)
}
