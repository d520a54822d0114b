//! Config command
//!
//! Inspect coursekit configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use coursekit_core::config::{Config, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,

    /// Print which configuration file is used
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(explicit, json),
        ConfigCommand::Validate => validate_config(explicit),
        ConfigCommand::Path => show_path(explicit),
    }
}

/// File the configuration is loaded from, if any
fn active_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(Config::discover)
}

fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
    let config = super::load_config(explicit)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match active_path(explicit) {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(built-in defaults)".dimmed()),
    }
    println!();
    println!("{}", config.to_toml()?);
    Ok(())
}

fn validate_config(explicit: Option<&Path>) -> Result<()> {
    let Some(path) = active_path(explicit) else {
        println!(
            "{} No configuration file found, built-in defaults are valid. Run '{}' to create one.",
            "⚠".yellow(),
            "coursekit init".cyan()
        );
        return Ok(());
    };

    Config::load(Some(&path)).with_context(|| format!("{} is not valid", path.display()))?;
    println!("{} {} is valid", "✓".green(), path.display());
    Ok(())
}

fn show_path(explicit: Option<&Path>) -> Result<()> {
    match active_path(explicit) {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("{}", "(none, using built-in defaults)".dimmed());
            println!("Searched:");
            println!("  ./{}", CONFIG_FILE_NAME);
            if let Some(user) = Config::user_config_path() {
                println!("  {}", user.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_explicit_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("coursekit.toml");

        fs::write(&path, "[layout]\ndefault_course = \"ECP\"\n").unwrap();
        assert!(validate_config(Some(&path)).is_ok());

        fs::write(&path, "[setup]\nrequired_packages = [\"not a module\"]\n").unwrap();
        assert!(validate_config(Some(&path)).is_err());
    }

    #[test]
    fn test_active_path_prefers_explicit() {
        let path = Path::new("custom.toml");
        assert_eq!(active_path(Some(path)), Some(PathBuf::from("custom.toml")));
    }
}
