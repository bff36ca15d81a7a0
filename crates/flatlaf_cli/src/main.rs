//! flatlaf - inspect FlatLaf themes and styles from the command line
//!
//! ```text
//! flatlaf eval "arc: 12; background: darken(@background, 5%)"
//! flatlaf resolve '$Button.background' --key Button.hoverBackground
//! flatlaf dump FlatLightLaf.properties --filter Button.
//! flatlaf infos RadioButton
//! ```
//!
//! Theme files, dark mode, platform and scale come from `flatlaf.toml` and
//! can be overridden with flags.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::{Overrides, Settings};
use crate::config::FlatLafConfig;

#[derive(Parser, Debug)]
#[command(name = "flatlaf")]
#[command(about = "Evaluate FlatLaf styles and inspect theme defaults")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./flatlaf.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    theme: ThemeArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ThemeArgs {
    /// Theme properties file; replaces the files from the config
    #[arg(short, long = "theme", global = true)]
    themes: Vec<PathBuf>,

    /// Enable `[dark]` keys
    #[arg(long, global = true)]
    dark: bool,

    /// Platform for `[win]`/`[mac]`/`[linux]` keys
    #[arg(long, global = true)]
    platform: Option<String>,

    /// User scale factor
    #[arg(long, global = true)]
    scale: Option<f32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse style text and print its typed values
    Eval {
        /// Style text, e.g. "arc: 12; foreground: #f00"
        style: String,
    },

    /// Resolve references in a value and parse it
    Resolve {
        value: String,

        /// Key the value is parsed for; decides the value type
        #[arg(short, long, default_value = "value")]
        key: String,
    },

    /// Load properties files and print the resulting defaults
    Dump {
        /// Loaded after the theme files
        files: Vec<PathBuf>,

        /// Only keys starting with this prefix
        #[arg(short, long)]
        filter: Option<String>,

        /// Also print variables
        #[arg(long)]
        variables: bool,
    },

    /// Print the styleable keys of a component type
    Infos {
        /// Button, ToggleButton, CheckBox, RadioButton or TextField
        type_name: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = FlatLafConfig::load(cli.config.as_deref())?;
    let mut overrides = Overrides {
        files: cli.theme.themes,
        dark: cli.theme.dark,
        platform: cli.theme.platform,
        scale: cli.theme.scale,
    };
    if let Command::Dump { files, .. } = &cli.command {
        if overrides.files.is_empty() {
            overrides.files = config.theme.files.clone();
        }
        overrides.files.extend(files.iter().cloned());
    }

    let settings = Settings::new(config, overrides)?;
    let defaults = settings.build_defaults()?;

    let out = match &cli.command {
        Command::Eval { style } => commands::eval(style, &defaults)?,
        Command::Resolve { value, key } => commands::resolve(value, key, &defaults)?,
        Command::Dump { filter, variables, .. } => commands::dump(&defaults, filter.as_deref(), *variables),
        Command::Infos { type_name } => commands::infos(type_name, &defaults)?,
    };
    print!("{}", out);
    Ok(())
}
