//! osc-notify: assemble desktop notifications from OSC 99 invocations.
//!
//! Reads one `<metadata>;<payload>` invocation per line and prints every
//! completed notification.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};

use osc_notify_core::Config;
use osc_notify_core::config::LogFormat;
use osc_notify_core::logging::init_logging;

mod stream;

use stream::{OutputFormat, StreamOptions};

#[derive(ClapParser, Debug)]
#[command(name = "osc-notify", version, about = "Assemble chunked OSC 99 desktop notifications")]
struct Cli {
    /// Path to an osc-notify.toml config file
    #[arg(long, global = true, env = "OSC_NOTIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Override the configured log format (pretty or json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse invocations from a file (or stdin) and print notifications
    Parse {
        /// Input file; reads stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Output format for emitted notifications
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Reinitialize the parser after a failed invocation instead of
        /// stopping
        #[arg(long)]
        reset_on_error: bool,
    },
    /// Validate a config file and print the effective settings
    CheckConfig {
        /// Config file to validate
        path: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn check_config(path: &PathBuf) -> anyhow::Result<()> {
    let config =
        Config::load(path).with_context(|| format!("Invalid config {}", path.display()))?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{rendered}");
    Ok(())
}

fn run_parse(
    config: &Config,
    input: Option<PathBuf>,
    options: StreamOptions,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let summary = match input.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
            stream::process(BufReader::new(file), stdout.lock(), &config.parser, options)?
        }
        None => stream::process(io::stdin().lock(), stdout.lock(), &config.parser, options)?,
    };
    tracing::info!(
        invocations = summary.invocations,
        emitted = summary.emitted,
        pending = summary.pending,
        dropped = summary.dropped,
        failed = summary.failed,
        "Finished"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig { path } => check_config(&path),
        Commands::Parse {
            input,
            format,
            reset_on_error,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(level) = cli.log_level {
                config.logging.level = level;
            }
            if let Some(format) = cli.log_format {
                config.logging.format = format;
            }
            init_logging(&config.logging).context("Failed to initialize logging")?;
            run_parse(
                &config,
                input,
                StreamOptions {
                    format,
                    reset_on_error,
                },
            )
        }
    }
}
