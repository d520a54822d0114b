//! Create command
//!
//! Create notebooks from templates at their canonical locations.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use coursekit_core::config::Config;
use coursekit_core::paths::{prepare_dir, slugify, DirStatus, NotebookTarget, PathSynthesizer};
use coursekit_core::template::{NotebookMaterializer, TemplateRegistry};
use coursekit_core::TemplateKind;
use std::path::{Path, PathBuf};

/// Create subcommands
#[derive(Debug, Subcommand)]
pub enum CreateCommand {
    /// Create a chapter notebook under notebooks/<course>/
    Chapter {
        /// Chapter number
        number: u32,

        /// Course name (defaults to layout.default_course)
        #[arg(long)]
        course: Option<String>,

        /// Chapter title
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Create a practical notebook
    Practical {
        /// Practical number
        number: u32,

        /// Practical title
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Create a notes notebook
    Notes {
        /// Output path, or a directory when --title is given
        path: PathBuf,

        /// Notes title
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Create a notebook from any template
    From {
        /// Template type (chapter, practical, notes)
        template: String,

        /// Output path, or a directory when --title is given
        output: PathBuf,

        /// Notebook title
        #[arg(long, short)]
        title: Option<String>,
    },
}

/// Execute the create command
pub fn execute(cmd: CreateCommand, config: &Config) -> Result<()> {
    let materializer = NotebookMaterializer::new(TemplateRegistry::new(&config.templates));
    let paths = PathSynthesizer::new(config.layout.clone());

    let created = match cmd {
        CreateCommand::Chapter {
            number,
            course,
            title,
        } => {
            let target = paths.chapter(number, course.as_deref(), title.as_deref());
            ensure_target_dir(&target)?;
            materializer.materialize(TemplateKind::Chapter.as_str(), &target.path())
        }
        CreateCommand::Practical { number, title } => {
            let target = paths.practical(number, title.as_deref());
            materializer.materialize(TemplateKind::Practical.as_str(), &target.path())
        }
        CreateCommand::Notes { path, title } => {
            let destination = titled_destination(&path, title.as_deref());
            materializer.materialize(TemplateKind::Notes.as_str(), &destination)
        }
        CreateCommand::From {
            template,
            output,
            title,
        } => {
            let destination = titled_destination(&output, title.as_deref());
            materializer.materialize(&template, &destination)
        }
    }
    .context("Failed to create notebook")?;

    println!("{} Created notebook: {}", "✓".green(), created.display());
    Ok(())
}

/// Chapter directories are created on demand, with a warning
fn ensure_target_dir(target: &NotebookTarget) -> Result<()> {
    let status = prepare_dir(&target.dir)
        .with_context(|| format!("Failed to create {}", target.dir.display()))?;
    if status == DirStatus::Created {
        eprintln!(
            "{} Directory {} didn't exist, created it",
            "⚠".yellow(),
            target.dir.display()
        );
    }
    Ok(())
}

/// Resolves to `<dir>/<slug>.ipynb` when `path` is a directory and a title is given
fn titled_destination(path: &Path, title: Option<&str>) -> PathBuf {
    match title.filter(|t| !t.is_empty()) {
        Some(title) if path.is_dir() => path.join(format!("{}.ipynb", slugify(title))),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titled_destination_in_directory() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(
            titled_destination(temp.path(), Some("Week One")),
            temp.path().join("week-one.ipynb")
        );
    }

    #[test]
    fn test_titled_destination_plain_path() {
        let path = Path::new("notes/intro.ipynb");
        assert_eq!(titled_destination(path, Some("Intro")), path.to_path_buf());
        assert_eq!(titled_destination(path, None), path.to_path_buf());
    }

    #[test]
    fn test_titled_destination_directory_without_title() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(titled_destination(temp.path(), None), temp.path().to_path_buf());
    }
}
