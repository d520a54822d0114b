//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod create;
pub mod doctor;
pub mod export;
pub mod init;
pub mod render;
pub mod setup;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursekit_core::config::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// coursekit - Course notebook toolkit
#[derive(Debug, Parser)]
#[command(name = "coursekit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COURSEKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a notebook from a template
    #[command(subcommand)]
    Create(create::CreateCommand),

    /// Export notebooks with jupyter nbconvert
    Export(export::ExportArgs),

    /// Set up the Jupyter environment for the course
    Setup(setup::SetupArgs),

    /// Diagnose installation and configuration
    Doctor(doctor::DoctorArgs),

    /// Write coursekit.toml and starter templates
    Init(init::InitArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Print a notebook presentation snippet
    Render(render::RenderArgs),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();

    // Dispatch to command handler
    match cli.command {
        Commands::Create(cmd) => create::execute(cmd, &load_config(config_path)?),
        Commands::Export(args) => export::execute(args, &load_config(config_path)?),
        Commands::Setup(args) => setup::execute(args, &load_config(config_path)?),
        Commands::Doctor(args) => doctor::execute(args, config_path, cli.verbose > 0),
        Commands::Init(args) => init::execute(args),
        Commands::Config(cmd) => config::execute(cmd, config_path),
        Commands::Render(args) => render::execute(args),
    }
}

/// Load configuration from `--config`, `./coursekit.toml`, the user config or defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(source) = path.map(Path::to_path_buf).or_else(Config::discover) {
        debug!("Loading configuration from {}", source.display());
    }
    Config::load(path).context("Failed to load configuration")
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
