//! quakewatch CLI - Recent earthquakes from the USGS event feed.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod settings;

use display::Format;
use settings::{FilterArgs, Settings};

#[derive(Parser)]
#[command(name = "quakewatch")]
#[command(about = "Recent earthquakes from the USGS event feed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list recent earthquakes
    Fetch {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Print the query URL without fetching
    Url {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Inspect or initialize the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the settings file.
#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the settings file location
    Path,
}

/// Installs the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
fn setup_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);

    match command {
        Commands::Fetch { filter, format } => {
            let settings = filter.apply(Settings::load(&settings_path)?);
            commands::fetch::fetch(&settings, format, cli.quiet).await
        }
        Commands::Url { filter } => {
            commands::query::print_url(&filter.apply(Settings::load(&settings_path)?))
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::show(&Settings::load(&settings_path)?, &settings_path)
            }
            ConfigAction::Init { force } => commands::config::init(&settings_path, force),
            ConfigAction::Path => {
                commands::config::print_path(&settings_path);
                Ok(())
            }
        },
    }
}
