//! Doctor command
//!
//! Diagnose installation and configuration.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use coursekit_core::config::Config;
use coursekit_core::process::SystemRunner;
use coursekit_setup::verification::{run_package_checks, run_project_checks, run_tool_checks};
use coursekit_setup::VerificationResult;
use std::path::Path;

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Skip the Python package import checks
    #[arg(long)]
    pub skip_packages: bool,

    /// Exit with an error status if any check fails
    #[arg(long)]
    pub strict: bool,
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let runner = SystemRunner;
    let mut results = Vec::new();

    println!("\n{}", "1. System Environment".bold().underline());
    let (config, config_check) = check_configuration(config_path);
    let mut section = vec![VerificationResult::pass("coursekit version", env!("CARGO_PKG_VERSION"))];
    section.extend(run_tool_checks(&runner, &config));
    print_section(&section, verbose);
    results.extend(section);

    println!("\n{}", "2. Configuration".bold().underline());
    print_section(std::slice::from_ref(&config_check), verbose);
    results.push(config_check);

    println!("\n{}", "3. Project Files".bold().underline());
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let section = run_project_checks(&config, &root);
    print_section(&section, verbose);
    results.extend(section);

    if !args.skip_packages {
        println!("\n{}", "4. Python Packages".bold().underline());
        let section = run_package_checks(&runner, &config);
        print_section(&section, verbose);
        results.extend(section);
    }

    let warnings: Vec<&VerificationResult> = results.iter().filter(|r| r.is_warning()).collect();
    let errors: Vec<&VerificationResult> = results.iter().filter(|r| !r.passed).collect();

    // Summary
    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.len().to_string().yellow(),
        errors.len().to_string().red()
    );

    if !warnings.is_empty() {
        println!("\n{}", "⚠ Warnings:".yellow());
        for result in &warnings {
            println!("  - {}", result.name);
            if let Some(suggestion) = &result.suggestion {
                println!("    {}", suggestion.dimmed());
            }
        }
    }

    if !errors.is_empty() {
        println!("\n{}", "✗ Errors:".red());
        for result in &errors {
            println!("  - {}: {}", result.name, result.message);
            if let Some(suggestion) = &result.suggestion {
                println!("    Fix: {}", suggestion);
            }
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        println!("\n{} All checks passed!", "✓".green());
    }

    if args.strict && !errors.is_empty() {
        bail!("{} checks failed", errors.len());
    }
    Ok(())
}

/// Load the configuration for the remaining checks; defaults are used if it is invalid
fn check_configuration(explicit: Option<&Path>) -> (Config, VerificationResult) {
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(Config::discover);

    match Config::load(explicit) {
        Ok(config) => {
            let message = match &source {
                Some(path) => format!("valid ({})", path.display()),
                None => "not found, using defaults".to_string(),
            };
            let check = if source.is_some() {
                VerificationResult::pass("coursekit.toml", &message)
            } else {
                VerificationResult::warn(
                    "coursekit.toml",
                    &message,
                    Some("Run 'coursekit init' to create"),
                )
            };
            (config, check)
        }
        Err(e) => (
            Config::default(),
            VerificationResult::fail(
                "coursekit.toml",
                &e.to_string(),
                Some("Fix the file or run 'coursekit config validate'"),
            ),
        ),
    }
}

fn print_section(results: &[VerificationResult], verbose: bool) {
    for result in results {
        let status = if !result.passed {
            "✗".red()
        } else if result.is_warning() {
            "⚠".yellow()
        } else {
            "✓".green()
        };

        println!("   {} {}: {}", status, result.name, result.message);

        if verbose {
            if let Some(suggestion) = &result.suggestion {
                println!("     {}", suggestion.dimmed());
            }
        }
    }
}
