mod cmd;
mod error;
mod script;

use std::{
    env, fmt,
    io::{self, Write},
    process::ExitCode,
};

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use cmd::Commands;
use error::Result;
use ht_config::Config;
use tracing::{error, trace};

/// Fixed-capacity hash table playground.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    globals: Globals,

    #[command(subcommand, next_help_heading = "Options")]
    command: Commands,
}

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// Override a configuration value for the duration of the command.
    #[arg(short, long, value_name = "KEY=VALUE", global = true, action = ArgAction::Append)]
    config: Vec<String>,

    /// Load configuration from a TOML file.
    #[arg(long, value_name = "PATH", global = true)]
    config_file: Option<Utf8PathBuf>,

    /// Increase verbosity of logging.
    ///
    /// Can be specified multiple times to increase verbosity.
    ///
    /// Defaults to printing "error" messages. For each increase in verbosity,
    /// the log level is set to "warn", "info", "debug", and "trace"
    /// respectively.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output, including errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl fmt::Display for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(&"config", &self.globals.config)
            .entry(&"config_file", &self.globals.config_file)
            .entry(&"verbose", &self.globals.verbose)
            .entry(&"quiet", &self.globals.quiet)
            .finish()
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.globals.quiet;

    configure_logging(cli.globals.verbose, quiet);
    trace!(command = cli.command.name(), arguments = %cli, "Starting CLI run.");

    match run_inner(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed.");
            if !quiet {
                report_error(&err, &mut io::stderr());
            }

            ExitCode::FAILURE
        }
    }
}

/// Write `err` for the user. A failing writer has nowhere left to report to.
fn report_error(err: &error::Error, out: &mut impl Write) {
    writeln!(out, "{err}").ok();
}

fn run_inner(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.globals.config_file.as_deref())?;
    apply_cli_configs(&cli.globals.config, &mut config)?;
    config.validate()?;

    let mut stdout = io::stdout().lock();
    cli.command.run(&config, &mut stdout)
}

/// Build the configuration from the optional file and the environment.
fn load_config(path: Option<&camino::Utf8Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    config.apply_env(env::vars())?;

    Ok(config)
}

/// Apply CLI config overrides to the [`Config`].
fn apply_cli_configs(overrides: &[String], config: &mut Config) -> Result<()> {
    trace!(overrides = ?overrides, "Applying CLI config overrides.");

    for field in overrides {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        config.set(key, value)?;
    }

    Ok(())
}

fn configure_logging(verbose: u8, quiet: bool) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;

    let mut level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    if quiet {
        level = LevelFilter::OFF;
    }

    let mut filter = vec!["off".to_owned()];
    for krate in ["cli", "config", "table"] {
        filter.push(format!("ht_{krate}={level}"));
    }

    let format = fmt::format().with_target(false).compact();

    if level < LevelFilter::DEBUG {
        tracing_subscriber::fmt()
            .event_format(format)
            .without_time()
            .with_ansi(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    } else {
        tracing_subscriber::fmt()
            .event_format(format)
            .with_ansi(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    }
}
