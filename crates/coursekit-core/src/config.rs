//! Configuration management for coursekit

use crate::error::{CourseKitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "coursekit.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template locations
    pub templates: TemplatesConfig,
    /// Notebook directory layout
    pub layout: LayoutConfig,
    /// Export settings
    pub export: ExportConfig,
    /// Environment setup settings
    pub setup: SetupConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./coursekit.toml` is tried,
    /// then the user configuration directory, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CourseKitError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => match Self::discover() {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Find the first config file that exists on disk
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    /// Per-user config location
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "coursekit", "coursekit")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Invalid config {}", path.display())))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CourseKitError::Toml(e.to_string()))
    }

    /// Check values that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.export.converter.trim().is_empty() {
            return Err(CourseKitError::Config(
                "export.converter must not be empty".to_string(),
            ));
        }
        if self.layout.default_course.trim().is_empty() {
            return Err(CourseKitError::Config(
                "layout.default_course must not be empty".to_string(),
            ));
        }
        for route in &self.export.routes {
            if route.marker.is_empty() {
                return Err(CourseKitError::Config(
                    "export.routes entries need a non-empty marker".to_string(),
                ));
            }
        }
        for pattern in &self.export.exclude_patterns {
            globset::Glob::new(pattern)?;
        }
        if let Some(pkg) = self
            .setup
            .required_packages
            .iter()
            .find(|p| !is_module_name(p))
        {
            return Err(CourseKitError::Config(format!(
                "setup.required_packages: '{}' is not a valid module name",
                pkg
            )));
        }
        Ok(())
    }
}

/// Python dotted module name
pub fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Template file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding the template files
    pub dir: PathBuf,
    pub chapter: String,
    pub practical: String,
    pub notes: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tools/templates"),
            chapter: "chapter_template.ipynb".to_string(),
            practical: "practical_template.ipynb".to_string(),
            notes: "notes_template.ipynb".to_string(),
        }
    }
}

/// Where generated notebooks live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Root of all course notebooks
    pub notebooks_dir: PathBuf,
    /// Course used when none is given
    pub default_course: String,
    /// Course that hosts the practicals folder
    pub practicals_course: String,
    /// Folder name of practicals inside that course
    pub practicals_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            notebooks_dir: PathBuf::from("notebooks"),
            default_course: "DPP".to_string(),
            practicals_course: "DPP".to_string(),
            practicals_dir: "Practicals".to_string(),
        }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Converter program
    pub converter: String,
    /// Arguments placed before the per-call arguments
    pub converter_args: Vec<String>,
    /// Output directory when no route matches
    pub fallback_dir: PathBuf,
    /// Globs skipped by directory walks
    pub exclude_patterns: Vec<String>,
    /// Output routes, first match wins
    pub routes: Vec<OutputRoute>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            converter: "jupyter".to_string(),
            converter_args: vec!["nbconvert".to_string()],
            fallback_dir: PathBuf::from("outputs"),
            exclude_patterns: vec!["**/.ipynb_checkpoints/**".to_string()],
            routes: vec![
                OutputRoute {
                    marker: "DPP".to_string(),
                    reports_dir: PathBuf::from("outputs/DPP/reports"),
                    code_dir: PathBuf::from("outputs/DPP/code"),
                },
                OutputRoute {
                    marker: "ECP".to_string(),
                    reports_dir: PathBuf::from("outputs/ECP/exports"),
                    code_dir: PathBuf::from("outputs/ECP/code"),
                },
            ],
        }
    }
}

/// Output directories for notebooks whose path contains `marker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRoute {
    pub marker: String,
    pub reports_dir: PathBuf,
    pub code_dir: PathBuf,
}

/// Environment setup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Python interpreter
    pub python: String,
    /// Jupyter launcher used for extensions and the config directory
    pub jupyter: String,
    /// Requirements file passed to pip
    pub requirements: PathBuf,
    /// Notebook extensions to enable
    pub extensions: Vec<String>,
    pub kernel_name: String,
    pub kernel_display_name: String,
    /// Stylesheet copied into the Jupyter config directory
    pub custom_css: PathBuf,
    /// Modules that must import after setup
    pub required_packages: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            python: if cfg!(windows) { "python" } else { "python3" }.to_string(),
            jupyter: "jupyter".to_string(),
            requirements: PathBuf::from("requirements.txt"),
            extensions: vec![
                "toc2/main".to_string(),
                "execute_time/ExecuteTime".to_string(),
                "code_prettify/code_prettify".to_string(),
                "collapsible_headings/main".to_string(),
                "codefolding/main".to_string(),
            ],
            kernel_name: "python3".to_string(),
            kernel_display_name: "Python 3 (Y3S2)".to_string(),
            custom_css: PathBuf::from("tools/styles/custom.css"),
            required_packages: vec![
                "jupyter".to_string(),
                "notebook".to_string(),
                "jupyterlab".to_string(),
                "numpy".to_string(),
                "pandas".to_string(),
                "matplotlib".to_string(),
            ],
        }
    }
}
