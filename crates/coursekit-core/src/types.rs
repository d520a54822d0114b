//! Core type definitions for coursekit

use crate::error::CourseKitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notebook archetype bound to a template file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Course chapter notebook
    Chapter,
    /// Practical session notebook
    Practical,
    /// Free-form notes notebook
    Notes,
}

impl TemplateKind {
    /// All template kinds, in display order
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Chapter,
        TemplateKind::Practical,
        TemplateKind::Notes,
    ];

    /// Name used on the command line and in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Chapter => "chapter",
            TemplateKind::Practical => "practical",
            TemplateKind::Notes => "notes",
        }
    }

    /// Comma separated list of every kind name
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = CourseKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CourseKitError::UnknownTemplate {
                kind: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Output format handed to the document converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
    Markdown,
    Slides,
    Script,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Html,
        ExportFormat::Pdf,
        ExportFormat::Markdown,
        ExportFormat::Slides,
        ExportFormat::Script,
    ];

    /// Value passed to the converter's `--to` flag
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Slides => "slides",
            ExportFormat::Script => "script",
        }
    }

    /// Suffix appended to the notebook stem, extension included
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ExportFormat::Html => ".html",
            ExportFormat::Pdf => ".pdf",
            ExportFormat::Markdown => ".md",
            ExportFormat::Slides => "_slides.html",
            ExportFormat::Script => ".py",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CourseKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CourseKitError::UnsupportedFormat(s.to_string()))
    }
}
