//! Export command
//!
//! Export notebooks, extract their code or clear their outputs.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use coursekit_core::config::Config;
use coursekit_core::export::{BatchObserver, BatchResult, BatchWalker, ExportDispatcher, ExportOutcome};
use coursekit_core::paths::PathSynthesizer;
use coursekit_core::process::SystemRunner;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ExportFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// PDF (needs a LaTeX installation)
    Pdf,
    /// Markdown
    Markdown,
    /// reveal.js slides
    Slides,
    /// Plain Python script
    Script,
}

impl From<ExportFormat> for coursekit_core::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Html => Self::Html,
            ExportFormat::Pdf => Self::Pdf,
            ExportFormat::Markdown => Self::Markdown,
            ExportFormat::Slides => Self::Slides,
            ExportFormat::Script => Self::Script,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Notebook or directory to process
    #[arg(required_unless_present = "course", conflicts_with = "course")]
    pub path: Option<PathBuf>,

    /// Export format
    #[arg(long, short, value_enum, default_value_t = ExportFormat::Html)]
    pub format: ExportFormat,

    /// Output directory (inferred from the notebook path if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Recursively process directories
    #[arg(long, short)]
    pub recursive: bool,

    /// Clear cell outputs in place instead of exporting
    #[arg(long, conflicts_with = "code")]
    pub clean: bool,

    /// Extract code to a Python script
    #[arg(long)]
    pub code: bool,

    /// Export every notebook of a course
    #[arg(long, conflicts_with_all = ["clean", "code", "output"])]
    pub course: Option<String>,
}

/// What to do with each notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Export,
    ExtractCode,
    Clean,
}

impl Action {
    fn from_args(args: &ExportArgs) -> Self {
        if args.clean {
            Action::Clean
        } else if args.code {
            Action::ExtractCode
        } else {
            Action::Export
        }
    }
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    let dispatcher = ExportDispatcher::new(SystemRunner, &config.export);
    let format = coursekit_core::ExportFormat::from(args.format);

    if let Some(course) = &args.course {
        let walker = BatchWalker::new(&dispatcher, &config.export.exclude_patterns)?;
        let paths = PathSynthesizer::new(config.layout.clone());
        let mut progress = ProgressObserver::new("Exporting");
        let result = walker.export_course(&paths, course, format, &mut progress)?;
        return report(&result);
    }

    let Some(path) = args.path.as_deref() else {
        bail!("Nothing to export: give a path or --course");
    };
    let output = args.output.as_deref();
    let action = Action::from_args(&args);

    if path.is_dir() {
        let walker = BatchWalker::new(&dispatcher, &config.export.exclude_patterns)?;
        let mut progress = ProgressObserver::new(match action {
            Action::Export => "Exporting",
            Action::ExtractCode => "Extracting",
            Action::Clean => "Cleaning",
        });
        let result = match action {
            Action::Export => walker.export_all(path, format, output, args.recursive, &mut progress),
            Action::ExtractCode => walker.extract_code_all(path, output, args.recursive, &mut progress),
            Action::Clean => walker.clear_outputs(path, args.recursive, &mut progress),
        }?;
        return report(&result);
    }

    export_single(&dispatcher, path, action, format, output)
}

fn export_single(
    dispatcher: &ExportDispatcher<SystemRunner>,
    path: &Path,
    action: Action,
    format: coursekit_core::ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match action {
        Action::Export => {
            let written = dispatcher
                .export(path, format, output)
                .with_context(|| format!("Failed to export {}", path.display()))?;
            println!("{} Exported to: {}", "✓".green(), written.display());
        }
        Action::ExtractCode => {
            let written = dispatcher
                .extract_code(path, output)
                .with_context(|| format!("Failed to extract code from {}", path.display()))?;
            println!("{} Code extracted to: {}", "✓".green(), written.display());
        }
        Action::Clean => {
            let cleaned = dispatcher
                .clear_outputs(path)
                .with_context(|| format!("Failed to clean {}", path.display()))?;
            println!("{} Cleaned outputs: {}", "✓".green(), cleaned.display());
        }
    }
    Ok(())
}

/// Print the tally; any failed notebook makes the command fail
fn report(result: &BatchResult) -> Result<()> {
    if result.attempted == 0 {
        return Ok(());
    }

    let tally = format!("{}/{}", result.succeeded, result.attempted);
    let tally = if result.all_succeeded() {
        tally.green()
    } else {
        tally.yellow()
    };
    println!("\n{} {} notebooks processed successfully", "Summary:".bold(), tally);

    if !result.all_succeeded() {
        for failed in &result.failed {
            eprintln!("  {} {}", "✗".red(), failed.display());
        }
        bail!("{} of {} notebooks failed", result.failed_count(), result.attempted);
    }
    Ok(())
}

/// Shows a progress bar and one line per processed notebook
struct ProgressObserver {
    verb: &'static str,
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new(verb: &'static str) -> Self {
        Self {
            verb,
            bar: ProgressBar::hidden(),
        }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        println!("{} {} notebooks...", self.verb, total.to_string().cyan());
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        self.bar = bar;
    }

    fn on_empty(&mut self, dir: &Path) {
        eprintln!("{} No notebooks found in {}", "⚠".yellow(), dir.display());
    }

    fn on_item(&mut self, notebook: &Path, outcome: &ExportOutcome) {
        let line = match outcome {
            ExportOutcome::Succeeded { output } => format!(
                "{} {} -> {}",
                "✓".green(),
                notebook.display(),
                output.display()
            ),
            ExportOutcome::Failed { error } => {
                format!("{} {}: {}", "✗".red(), notebook.display(), error)
            }
        };
        self.bar.suspend(|| println!("{}", line));
        self.bar.set_message(
            notebook
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        self.bar.inc(1);
    }

    fn on_finish(&mut self, _result: &BatchResult) {
        self.bar.finish_and_clear();
    }
}
