//! `configure-me`: prints a greeting shaped by a layered configuration.

mod config;

use anyhow::Context;
use clap::Parser;
use config::{GreeterConfig, default_config_path, describe_definitions};
use log::{debug, info};
use std::path::PathBuf;
use strata_rs_config::{Configuration, LogIssues, OptionOverride};

/// Command-line options for `configure-me`.
#[derive(Parser)]
#[command(
    name = "configure-me",
    version,
    about = "A tool just begging to be configured"
)]
struct Cli {
    /// Path to a config file (.json, .json5, .yaml); defaults to ~/.configure-me/config.json5
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override a single option, e.g. `--config-option style="uppercase"`
    #[arg(long = "config-option", value_name = "PATH=VALUE")]
    config_options: Vec<OptionOverride>,
    /// Print the available options and exit
    #[arg(long)]
    list_options: bool,
    /// Include hidden and deprecated options when listing
    #[arg(long, requires = "list_options")]
    all: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    debug!(
        "configure-me starting (config={}, overrides={})",
        cli.config.is_some(),
        cli.config_options.len()
    );

    if cli.list_options {
        for line in describe_definitions(&GreeterConfig::definitions(), cli.all) {
            println!("{line}");
        }
        return Ok(());
    }

    let path = cli
        .config
        .clone()
        .or_else(|| default_config_path().filter(|path| path.is_file()));
    let config = match path {
        Some(path) => GreeterConfig::load_from_path(&path, &cli.config_options, &mut LogIssues)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            info!("no config file found, using defaults and overrides");
            GreeterConfig::parse_overrides(&cli.config_options, &mut LogIssues)
                .context("failed to apply config overrides")?
        }
    };

    let message = config.message();
    for _ in 0..config.repeat_count {
        println!("{message}");
    }
    Ok(())
}
