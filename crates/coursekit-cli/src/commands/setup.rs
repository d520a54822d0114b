//! Setup command
//!
//! Prepare the Jupyter environment for the course notebooks.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use console::{pad_str, Alignment};
use coursekit_core::config::Config;
use coursekit_core::process::SystemRunner;
use coursekit_setup::{EnvironmentSetup, SetupObserver, SetupStep, StepReport};

const BANNER_WIDTH: usize = 62;

/// Setup steps that can be selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    /// pip install -r requirements.txt
    Requirements,
    /// Notebook extensions
    Extensions,
    /// IPython kernel
    Kernel,
    /// Custom stylesheet
    CustomCss,
    /// Import check of required packages
    Verify,
}

impl From<StepArg> for SetupStep {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Requirements => SetupStep::Requirements,
            StepArg::Extensions => SetupStep::Extensions,
            StepArg::Kernel => SetupStep::Kernel,
            StepArg::CustomCss => SetupStep::CustomCss,
            StepArg::Verify => SetupStep::Verify,
        }
    }
}

/// Arguments for the setup command
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,

    /// Steps to run (default: all, in order)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub steps: Vec<StepArg>,

    /// Show what would be done without running anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the setup command
pub fn execute(args: SetupArgs, config: &Config) -> Result<()> {
    print_banner(&["Course Jupyter Environment Setup"]);

    let root = std::env::current_dir().context("Failed to read current directory")?;
    let setup = EnvironmentSetup::new(SystemRunner, config.setup.clone(), root);
    setup.check_preconditions()?;

    let steps = selected_steps(&args.steps);

    if args.dry_run {
        println!("{} Dry run - no changes will be made", "📋".to_string());
        println!("Would run:");
        for (i, step) in steps.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, step.description(), step.name().cyan());
        }
        return Ok(());
    }

    if !args.yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Run {} setup steps?", steps.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let mut printer = StepPrinter;
    let reports = setup.run(&steps, &mut printer);

    let failed: Vec<&StepReport> = reports.iter().filter(|r| !r.succeeded).collect();
    if failed.is_empty() {
        println!("\n{} All {} steps completed", "✓".green(), reports.len());
    } else {
        println!(
            "\n{} {} of {} steps had problems: {}",
            "⚠".yellow(),
            failed.len(),
            reports.len(),
            failed
                .iter()
                .map(|r| r.step.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    print_banner(&[
        "Setup Complete!",
        "",
        "Next steps:",
        "1. Launch Jupyter: jupyter notebook",
        "2. Navigate to notebooks/ directory",
        "3. Start learning!",
    ]);
    Ok(())
}

fn selected_steps(requested: &[StepArg]) -> Vec<SetupStep> {
    if requested.is_empty() {
        return SetupStep::ALL.to_vec();
    }
    // Always run in canonical order, once each
    SetupStep::ALL
        .iter()
        .copied()
        .filter(|step| requested.iter().any(|r| SetupStep::from(*r) == *step))
        .collect()
}

fn print_banner(lines: &[&str]) {
    let border = "═".repeat(BANNER_WIDTH);
    println!("\n╔{}╗", border);
    println!("║{}║", " ".repeat(BANNER_WIDTH));
    for line in lines {
        println!(
            "║{}║",
            pad_str(line, BANNER_WIDTH, Alignment::Center, Some("…")).bold()
        );
    }
    println!("║{}║", " ".repeat(BANNER_WIDTH));
    println!("╚{}╝\n", border);
}

/// Prints progress of each setup step
struct StepPrinter;

impl SetupObserver for StepPrinter {
    fn step_started(&mut self, index: usize, total: usize, step: SetupStep) {
        println!(
            "\n{} {}",
            format!("[{}/{}]", index, total).cyan(),
            step.description().bold()
        );
    }

    fn step_finished(&mut self, report: &StepReport) {
        for command in &report.commands {
            if command.succeeded {
                println!("   {} {}", "✓".green(), command.description);
            } else {
                println!("   {} {}", "✗".red(), command.description);
                println!("     {}", command.command.dimmed());
                if !command.output.is_empty() {
                    println!("     {}", command.output.dimmed());
                }
            }
        }
        for check in &report.checks {
            let status = if check.passed { "✓".green() } else { "✗".red() };
            println!("   {} {}: {}", status, check.name, check.message);
        }
        for note in &report.notes {
            println!("   {} {}", "⚠".yellow(), note);
        }
    }
}
