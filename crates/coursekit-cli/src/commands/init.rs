//! Init command
//!
//! Write a default configuration and starter notebook templates.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use coursekit_core::config::{Config, CONFIG_FILE_NAME};
use coursekit_core::template::TemplateRegistry;
use coursekit_core::TemplateKind;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite existing configuration and templates
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    let project_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!(
        "{} Initializing coursekit in {}...",
        "🚀".to_string(),
        project_dir.display()
    );

    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to reinitialize.",
            "⚠".yellow(),
            CONFIG_FILE_NAME
        );
        return Ok(());
    }

    fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;

    let config = Config::default();
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Generated {}", "✓".green(), CONFIG_FILE_NAME);

    let written = write_templates(&project_dir, &TemplateRegistry::new(&config.templates), args.force)?;
    for path in &written {
        println!("{} Created template {}", "✓".green(), path.display());
    }
    if written.is_empty() {
        println!("{} Templates already present, left unchanged", "✓".green());
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Review and customize {}", CONFIG_FILE_NAME);
    println!("  2. Edit the templates under {}", config.templates.dir.display());
    println!("  3. Create your first chapter:");
    println!("     ");
    println!("     {}", "coursekit create chapter 1 --title \"Introduction\"".cyan());
    println!(
        "\n{} Tip: Run '{}' to verify your setup",
        "💡".to_string(),
        "coursekit doctor".cyan()
    );

    Ok(())
}

/// Write starter templates below `root`; existing files are kept unless `force`
fn write_templates(root: &Path, registry: &TemplateRegistry, force: bool) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (kind, relative) in registry.iter() {
        let path = root.join(relative);
        if path.exists() && !force {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let notebook = serde_json::to_string_pretty(&starter_notebook(kind))?;
        fs::write(&path, notebook + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(relative.to_path_buf());
    }
    Ok(written)
}

fn markdown_cell(source: &str) -> Value {
    json!({
        "cell_type": "markdown",
        "metadata": {},
        "source": split_source(source),
    })
}

fn code_cell(source: &str) -> Value {
    json!({
        "cell_type": "code",
        "execution_count": null,
        "metadata": {},
        "outputs": [],
        "source": split_source(source),
    })
}

/// nbformat stores cell source as lines that keep their newline
fn split_source(source: &str) -> Vec<String> {
    source.split_inclusive('\n').map(str::to_string).collect()
}

/// Minimal nbformat 4 notebook for a template kind
fn starter_notebook(kind: TemplateKind) -> Value {
    let cells = match kind {
        TemplateKind::Chapter => vec![
            markdown_cell("# Chapter NN: Title\n\n**Course:** DPP\n"),
            markdown_cell(
                "### Learning Objectives\n\nBy the end of this section, you should be able to:\n\n- [ ] \n",
            ),
            code_cell("import numpy as np\nimport pandas as pd\nimport matplotlib.pyplot as plt"),
            markdown_cell("## 1. Introduction\n"),
            markdown_cell("### Key Points\n\n- \n"),
        ],
        TemplateKind::Practical => vec![
            markdown_cell("# Practical NN: Title\n"),
            markdown_cell("## Aim\n"),
            code_cell("# Setup"),
            markdown_cell("### Exercise 1\n\n**Task:** \n"),
            code_cell("# Your solution here"),
            markdown_cell("## Conclusion\n"),
        ],
        TemplateKind::Notes => vec![
            markdown_cell("# Notes: Title\n"),
            markdown_cell("## Summary\n"),
            code_cell(""),
        ],
    };

    json!({
        "cells": cells,
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3"
            },
            "language_info": {
                "name": "python"
            }
        },
        "nbformat": 4,
        "nbformat_minor": 5
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_notebook_shape() {
        for kind in TemplateKind::ALL {
            let notebook = starter_notebook(kind);
            assert_eq!(notebook["nbformat"], 4);
            let cells = notebook["cells"].as_array().unwrap();
            assert!(!cells.is_empty());
            assert_eq!(cells[0]["cell_type"], "markdown");
        }
    }

    #[test]
    fn test_split_source_keeps_newlines() {
        assert_eq!(split_source("a\nb"), vec!["a\n", "b"]);
        assert!(split_source("").is_empty());
    }

    #[test]
    fn test_write_templates_respects_force() {
        let temp = tempfile::tempdir().unwrap();
        let registry = TemplateRegistry::default();

        let first = write_templates(temp.path(), &registry, false).unwrap();
        assert_eq!(first.len(), 3);
        let chapter = temp.path().join("tools/templates/chapter_template.ipynb");
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&chapter).unwrap()).unwrap();
        assert_eq!(parsed["metadata"]["kernelspec"]["name"], "python3");

        fs::write(&chapter, "custom").unwrap();
        assert!(write_templates(temp.path(), &registry, false).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&chapter).unwrap(), "custom");

        assert_eq!(write_templates(temp.path(), &registry, true).unwrap().len(), 3);
        assert_ne!(fs::read_to_string(&chapter).unwrap(), "custom");
    }
}
