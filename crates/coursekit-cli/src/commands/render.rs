//! Render command
//!
//! Print notebook presentation snippets, as raw text or as a Jupyter
//! MIME bundle.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use coursekit_styles::{
    alert, code_block, color, comparison_table, exercise, key_points, objectives, progress_bar,
    section_header, solution, summary, table, AlertKind, Rendered,
};

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Print a JSON MIME bundle instead of the raw snippet
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub helper: RenderCommand,
}

/// Alert flavours
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum AlertArg {
    #[default]
    Info,
    Warning,
    Success,
    Danger,
}

impl From<AlertArg> for AlertKind {
    fn from(kind: AlertArg) -> Self {
        match kind {
            AlertArg::Info => AlertKind::Info,
            AlertArg::Warning => AlertKind::Warning,
            AlertArg::Success => AlertKind::Success,
            AlertArg::Danger => AlertKind::Danger,
        }
    }
}

/// Presentation helpers
#[derive(Debug, Subcommand)]
pub enum RenderCommand {
    /// Markdown section header
    Header {
        title: String,

        /// Header level (clamped to 1-6)
        #[arg(long, short, default_value_t = 2)]
        level: usize,

        #[arg(long)]
        emoji: Option<String>,
    },

    /// HTML alert box
    Alert {
        message: String,

        #[arg(long, short, value_enum, default_value_t = AlertArg::Info)]
        kind: AlertArg,
    },

    /// Fenced code block
    Code {
        code: String,

        #[arg(long, default_value = "python")]
        language: String,
    },

    /// Markdown table; each row is a comma-separated list of cells
    Table {
        rows: Vec<String>,

        /// Comma-separated header names
        #[arg(long, value_delimiter = ',')]
        headers: Vec<String>,
    },

    /// Bulleted key points
    KeyPoints {
        #[arg(required = true)]
        points: Vec<String>,

        #[arg(long, default_value = "Key Points")]
        title: String,
    },

    /// Exercise with optional hints
    Exercise {
        number: u32,

        description: String,

        /// Hint (repeatable)
        #[arg(long = "hint")]
        hints: Vec<String>,
    },

    /// Collapsible solution block
    Solution {
        code: String,

        #[arg(long)]
        explanation: Option<String>,
    },

    /// HTML progress bar
    Progress {
        current: u64,

        total: u64,

        #[arg(long, default_value = "Progress")]
        label: String,
    },

    /// Two-column comparison table
    Compare {
        #[arg(long, value_delimiter = ',', required = true)]
        labels: Vec<String>,

        #[arg(long, value_delimiter = ',', required = true)]
        values1: Vec<String>,

        #[arg(long, value_delimiter = ',', required = true)]
        values2: Vec<String>,

        #[arg(long, default_value = "Option 1")]
        label1: String,

        #[arg(long, default_value = "Option 2")]
        label2: String,
    },

    /// Learning objectives checklist
    Objectives {
        #[arg(required = true)]
        items: Vec<String>,

        #[arg(long, default_value = "Learning Objectives")]
        title: String,
    },

    /// Summary grouped by category
    Summary {
        /// Category and items as NAME=item1,item2 (repeatable, kept in order)
        #[arg(long = "section", value_parser = parse_section, required = true)]
        sections: Vec<(String, Vec<String>)>,

        #[arg(long, default_value = "Summary")]
        title: String,
    },

    /// Hex value of a theme color
    Color { name: String },
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    if let RenderCommand::Color { name } = &args.helper {
        println!("{}", color(name));
        return Ok(());
    }

    let rendered = build(args.helper);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered.to_mime_bundle())?);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

fn build(helper: RenderCommand) -> Rendered {
    match helper {
        RenderCommand::Header {
            title,
            level,
            emoji,
        } => section_header(&title, level, emoji.as_deref()),
        RenderCommand::Alert { message, kind } => alert(&message, kind.into()),
        RenderCommand::Code { code, language } => code_block(&code, &language),
        RenderCommand::Table { rows, headers } => {
            let rows: Vec<Vec<String>> = rows.iter().map(|row| split_list(row)).collect();
            let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
            table(&rows, &headers)
        }
        RenderCommand::KeyPoints { points, title } => key_points(&points, &title),
        RenderCommand::Exercise {
            number,
            description,
            hints,
        } => {
            let hints: Vec<&str> = hints.iter().map(String::as_str).collect();
            exercise(number, &description, &hints)
        }
        RenderCommand::Solution { code, explanation } => solution(&code, explanation.as_deref()),
        RenderCommand::Progress {
            current,
            total,
            label,
        } => progress_bar(current, total, &label),
        RenderCommand::Compare {
            labels,
            values1,
            values2,
            label1,
            label2,
        } => comparison_table(&labels, &values1, &values2, &label1, &label2),
        RenderCommand::Objectives { items, title } => objectives(&items, &title),
        RenderCommand::Summary { sections, title } => summary(sections, &title),
        RenderCommand::Color { name } => Rendered::Markdown(color(&name).to_string()),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_section(value: &str) -> Result<(String, Vec<String>), String> {
    match value.split_once('=') {
        Some((name, items)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), split_list(items)))
        }
        _ => Err(format!("expected NAME=item1,item2, got '{}'", value)),
    }
}
