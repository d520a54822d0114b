//! Installation verification
//!
//! Checks shared by the setup verify step and `coursekit doctor`.

use crate::detection::{detect_python, tool_version};
use coursekit_core::config::Config;
use coursekit_core::process::{args, CommandRunner};
use coursekit_core::template::TemplateRegistry;
use std::path::Path;

/// Verification check result
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Check name
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Message describing the result
    pub message: String,
    /// Optional suggestion for fixing
    pub suggestion: Option<String>,
}

impl VerificationResult {
    /// Create a passing result
    pub fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    /// Create a failing result
    pub fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Create a warning result (passed but with suggestion)
    pub fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Verify a Python interpreter is available
pub fn verify_python<R: CommandRunner>(runner: &R, preferred: &str) -> VerificationResult {
    match detect_python(runner, preferred) {
        Some((program, version)) if program == preferred => {
            VerificationResult::pass("Python", &version)
        }
        Some((program, version)) => VerificationResult::warn(
            "Python",
            &format!("'{}' not found, using '{}' ({})", preferred, program, version),
            Some("Set setup.python in coursekit.toml"),
        ),
        None => VerificationResult::fail(
            "Python",
            "not found",
            Some("Install Python 3: https://www.python.org/downloads/"),
        ),
    }
}

/// Verify the Jupyter launcher is available
pub fn verify_jupyter<R: CommandRunner>(runner: &R, jupyter: &str) -> VerificationResult {
    match tool_version(runner, jupyter, &["--version"]) {
        Some(version) => VerificationResult::pass("Jupyter", &version),
        None => VerificationResult::fail(
            "Jupyter",
            "not found",
            Some("Run 'coursekit setup' or 'pip install jupyter'"),
        ),
    }
}

/// Verify the document converter runs
pub fn verify_converter<R: CommandRunner>(
    runner: &R,
    converter: &str,
    converter_args: &[String],
) -> VerificationResult {
    let mut extra: Vec<&str> = converter_args.iter().map(String::as_str).collect();
    extra.push("--version");
    let name = std::iter::once(converter)
        .chain(converter_args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    match tool_version(runner, converter, &extra) {
        Some(version) => VerificationResult::pass(&name, &version),
        None => VerificationResult::fail(
            &name,
            "not available",
            Some("Install nbconvert: pip install nbconvert"),
        ),
    }
}

/// Verify a Python module imports
pub fn verify_package<R: CommandRunner>(runner: &R, python: &str, package: &str) -> VerificationResult {
    let code = format!("import {}", package);
    match runner.run(python, &args(["-c", code.as_str()])) {
        Ok(output) if output.success => VerificationResult::pass(package, "installed"),
        _ => VerificationResult::fail(
            package,
            "NOT installed",
            Some(format!("pip install {}", package).as_str()),
        ),
    }
}

/// Verify a file the tooling depends on exists
pub fn verify_file(name: &str, path: &Path, suggestion: &str) -> VerificationResult {
    if path.is_file() {
        VerificationResult::pass(name, &path.display().to_string())
    } else {
        VerificationResult::fail(
            name,
            &format!("{} not found", path.display()),
            Some(suggestion),
        )
    }
}

/// One check per template kind
pub fn verify_templates(registry: &TemplateRegistry, root: &Path) -> Vec<VerificationResult> {
    registry
        .iter()
        .map(|(kind, path)| {
            verify_file(
                &format!("{} template", kind),
                &root.join(path),
                "Run 'coursekit init' to create starter templates",
            )
        })
        .collect()
}

/// Tool checks: interpreter, launcher and converter
pub fn run_tool_checks<R: CommandRunner>(runner: &R, config: &Config) -> Vec<VerificationResult> {
    vec![
        verify_python(runner, &config.setup.python),
        verify_jupyter(runner, &config.setup.jupyter),
        verify_converter(runner, &config.export.converter, &config.export.converter_args),
    ]
}

/// Project checks: templates and requirements file under `root`
pub fn run_project_checks(config: &Config, root: &Path) -> Vec<VerificationResult> {
    let mut results = verify_templates(&TemplateRegistry::new(&config.templates), root);
    let requirements = root.join(&config.setup.requirements);
    if requirements.is_file() {
        results.push(VerificationResult::pass(
            "requirements",
            &requirements.display().to_string(),
        ));
    } else {
        results.push(VerificationResult::warn(
            "requirements",
            &format!("{} not found", requirements.display()),
            Some("'coursekit setup' needs it to install packages"),
        ));
    }
    results
}

/// Package checks for every required module
pub fn run_package_checks<R: CommandRunner>(runner: &R, config: &Config) -> Vec<VerificationResult> {
    config
        .setup
        .required_packages
        .iter()
        .map(|pkg| verify_package(runner, &config.setup.python, pkg))
        .collect()
}
