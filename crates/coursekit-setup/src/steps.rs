//! Environment setup steps
//!
//! Each step runs independently: a failure is recorded in its report and
//! the next step still runs.

use crate::detection::jupyter_config_dir;
use crate::verification::{verify_package, VerificationResult};
use anyhow::{bail, Context, Result};
use coursekit_core::config::SetupConfig;
use coursekit_core::process::{args, display_command, CommandRunner};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Setup steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupStep {
    Requirements,
    Extensions,
    Kernel,
    CustomCss,
    Verify,
}

impl SetupStep {
    pub const ALL: [SetupStep; 5] = [
        SetupStep::Requirements,
        SetupStep::Extensions,
        SetupStep::Kernel,
        SetupStep::CustomCss,
        SetupStep::Verify,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SetupStep::Requirements => "requirements",
            SetupStep::Extensions => "extensions",
            SetupStep::Kernel => "kernel",
            SetupStep::CustomCss => "custom-css",
            SetupStep::Verify => "verify",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SetupStep::Requirements => "Installing Python requirements",
            SetupStep::Extensions => "Setting up Jupyter extensions",
            SetupStep::Kernel => "Installing IPython kernel",
            SetupStep::CustomCss => "Setting up custom CSS",
            SetupStep::Verify => "Verifying installation",
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One external command run during a step
#[derive(Debug, Clone)]
pub struct CommandLog {
    pub description: String,
    pub command: String,
    pub succeeded: bool,
    /// stdout on success, diagnostic text on failure
    pub output: String,
}

/// What happened during one step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: SetupStep,
    pub succeeded: bool,
    pub commands: Vec<CommandLog>,
    /// Warnings and remarks that did not fail the step
    pub notes: Vec<String>,
    /// Package checks (verify step only)
    pub checks: Vec<VerificationResult>,
}

impl StepReport {
    fn new(step: SetupStep) -> Self {
        Self {
            step,
            succeeded: true,
            commands: Vec::new(),
            notes: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Report for a step that stopped on an unexpected error
    pub fn errored(step: SetupStep, error: &anyhow::Error) -> Self {
        let mut report = Self::new(step);
        report.succeeded = false;
        report.notes.push(format!("Error during {}: {:#}", step, error));
        report
    }
}

/// Progress callbacks for a setup run
pub trait SetupObserver {
    fn step_started(&mut self, _index: usize, _total: usize, _step: SetupStep) {}
    fn step_finished(&mut self, _report: &StepReport) {}
}

impl SetupObserver for () {}

/// Runs the setup steps against one project root
pub struct EnvironmentSetup<R> {
    runner: R,
    config: SetupConfig,
    root: PathBuf,
}

impl<R: CommandRunner> EnvironmentSetup<R> {
    pub fn new(runner: R, config: SetupConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            config,
            root: root.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.root.join(&self.config.requirements)
    }

    /// Setup only makes sense from the course root, next to the requirements file
    pub fn check_preconditions(&self) -> Result<()> {
        let requirements = self.requirements_path();
        if !requirements.is_file() {
            bail!(
                "{} not found. Run setup from the course root directory.",
                requirements.display()
            );
        }
        Ok(())
    }

    /// Run `steps` in order; every step runs even if an earlier one failed
    pub fn run(&self, steps: &[SetupStep], observer: &mut dyn SetupObserver) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(steps.len());
        for (index, &step) in steps.iter().enumerate() {
            observer.step_started(index + 1, steps.len(), step);
            let report = self.run_step(step).unwrap_or_else(|e| {
                warn!("Error during {}: {:#}. Continuing with next step", step, e);
                StepReport::errored(step, &e)
            });
            observer.step_finished(&report);
            reports.push(report);
        }
        reports
    }

    pub fn run_step(&self, step: SetupStep) -> Result<StepReport> {
        match step {
            SetupStep::Requirements => self.install_requirements(),
            SetupStep::Extensions => self.setup_extensions(),
            SetupStep::Kernel => self.install_kernel(),
            SetupStep::CustomCss => self.setup_custom_css(),
            SetupStep::Verify => Ok(self.verify_installation()),
        }
    }

    /// `<python> -m pip install -r requirements.txt`
    pub fn install_requirements(&self) -> Result<StepReport> {
        let mut report = StepReport::new(SetupStep::Requirements);
        let requirements = self.requirements_path();
        let mut argv = args(["-m", "pip", "install", "-r"]);
        argv.push(requirements.into_os_string());

        let log = self.run_logged(
            &self.config.python,
            argv,
            "Installing dependencies from requirements file",
        );
        report.succeeded = log.succeeded;
        report.commands.push(log);
        Ok(report)
    }

    /// Install the contrib extensions, then enable each configured one.
    ///
    /// Installer failures are only warnings since the extensions may already
    /// be present; a failed enable fails the step.
    pub fn setup_extensions(&self) -> Result<StepReport> {
        let mut report = StepReport::new(SetupStep::Extensions);
        let jupyter = &self.config.jupyter;

        let installers = [
            (
                args(["contrib", "nbextension", "install", "--user"]),
                "Installing Jupyter contrib extensions",
            ),
            (
                args(["nbextensions_configurator", "enable", "--user"]),
                "Enabling extensions configurator",
            ),
        ];
        for (argv, description) in installers {
            let log = self.run_logged(jupyter, argv, description);
            if !log.succeeded {
                report
                    .notes
                    .push(format!("{} failed (may already be installed)", description));
            }
            report.commands.push(log);
        }

        for extension in &self.config.extensions {
            let log = self.run_logged(
                jupyter,
                args(["nbextension", "enable", extension.as_str()]),
                &format!("Enabling {} extension", extension),
            );
            report.succeeded &= log.succeeded;
            report.commands.push(log);
        }

        Ok(report)
    }

    /// Register the IPython kernel for the current user
    pub fn install_kernel(&self) -> Result<StepReport> {
        let mut report = StepReport::new(SetupStep::Kernel);
        let argv = args([
            "-m".to_string(),
            "ipykernel".to_string(),
            "install".to_string(),
            "--user".to_string(),
            format!("--name={}", self.config.kernel_name),
            format!("--display-name={}", self.config.kernel_display_name),
        ]);

        let log = self.run_logged(
            &self.config.python,
            argv,
            &format!("Installing IPython kernel '{}'", self.config.kernel_display_name),
        );
        report.succeeded = log.succeeded;
        report.commands.push(log);
        Ok(report)
    }

    /// Copy the course stylesheet into `<jupyter config dir>/custom/`.
    ///
    /// An existing stylesheet there is backed up first.
    pub fn setup_custom_css(&self) -> Result<StepReport> {
        let mut report = StepReport::new(SetupStep::CustomCss);

        let source = self.root.join(&self.config.custom_css);
        if !source.is_file() {
            report.succeeded = false;
            report
                .notes
                .push(format!("{} not found", source.display()));
            return Ok(report);
        }

        let config_dir = jupyter_config_dir(&self.runner, &self.config.jupyter)
            .context("Could not determine the Jupyter config directory")?;
        let custom_dir = config_dir.join("custom");
        fs::create_dir_all(&custom_dir)
            .with_context(|| format!("Failed to create {}", custom_dir.display()))?;

        let dest = custom_dir.join("custom.css");
        if dest.exists() {
            let backup = backup_path(&dest);
            fs::copy(&dest, &backup)
                .with_context(|| format!("Failed to back up {}", dest.display()))?;
            report
                .notes
                .push(format!("Backed up existing stylesheet to {}", backup.display()));
        }

        fs::copy(&source, &dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;
        info!("Custom CSS copied to {}", dest.display());
        report
            .notes
            .push(format!("Custom CSS copied to {}", dest.display()));
        Ok(report)
    }

    /// Check that every required package imports
    pub fn verify_installation(&self) -> StepReport {
        let mut report = StepReport::new(SetupStep::Verify);
        for package in &self.config.required_packages {
            let check = verify_package(&self.runner, &self.config.python, package);
            report.succeeded &= check.passed;
            report.checks.push(check);
        }
        report
    }

    fn run_logged(&self, program: &str, argv: Vec<OsString>, description: &str) -> CommandLog {
        let command = display_command(program, &argv);
        info!("{}: {}", description, command);

        let (succeeded, output) = match self.runner.run(program, &argv) {
            Ok(out) if out.success => (true, out.stdout.trim_end().to_string()),
            Ok(out) => (false, out.diagnostic()),
            Err(e) => (false, e.to_string()),
        };
        if !succeeded {
            warn!("{} failed: {}", description, output);
        }

        CommandLog {
            description: description.to_string(),
            command,
            succeeded,
            output,
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    PathBuf::from(format!(
        "{}.backup-{}",
        path.display(),
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fail, ok, ScriptedRunner};
    use pretty_assertions::assert_eq;

    fn project() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("requirements.txt"), "jupyter\n").unwrap();
        temp
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<(usize, usize, SetupStep)>,
        finished: Vec<(SetupStep, bool)>,
    }

    impl SetupObserver for Recorder {
        fn step_started(&mut self, index: usize, total: usize, step: SetupStep) {
            self.started.push((index, total, step));
        }
        fn step_finished(&mut self, report: &StepReport) {
            self.finished.push((report.step, report.succeeded));
        }
    }

    #[test]
    fn test_preconditions_need_requirements() {
        let temp = tempfile::tempdir().unwrap();
        let setup = EnvironmentSetup::new(ScriptedRunner::succeeding(), SetupConfig::default(), temp.path());
        assert!(setup.check_preconditions().is_err());

        fs::write(temp.path().join("requirements.txt"), "").unwrap();
        assert!(setup.check_preconditions().is_ok());
    }

    #[test]
    fn test_requirements_command() {
        let temp = project();
        let setup = EnvironmentSetup::new(ScriptedRunner::succeeding(), SetupConfig::default(), temp.path());
        let report = setup.install_requirements().unwrap();
        assert!(report.succeeded);

        let call = &setup.runner().calls()[0];
        assert_eq!(&call[1..5], &["-m", "pip", "install", "-r"]);
        assert!(call[5].ends_with("requirements.txt"));
    }

    #[test]
    fn test_extension_installer_failure_is_only_a_note() {
        let temp = project();
        let runner = ScriptedRunner::new(|call| {
            if call[1] == "contrib" {
                fail("already installed")
            } else {
                ok("")
            }
        });
        let setup = EnvironmentSetup::new(runner, SetupConfig::default(), temp.path());
        let report = setup.setup_extensions().unwrap();

        assert!(report.succeeded);
        assert_eq!(report.notes.len(), 1);
        // 2 installers + 5 extensions
        assert_eq!(report.commands.len(), 7);
        assert_eq!(
            report.commands[2].command,
            "jupyter nbextension enable toc2/main"
        );
    }

    #[test]
    fn test_kernel_display_name_is_single_argument() {
        let temp = project();
        let setup = EnvironmentSetup::new(ScriptedRunner::succeeding(), SetupConfig::default(), temp.path());
        setup.install_kernel().unwrap();
        let call = &setup.runner().calls()[0];
        assert_eq!(call.last().unwrap(), "--display-name=Python 3 (Y3S2)");
    }

    #[test]
    fn test_custom_css_copy_and_backup() {
        let temp = project();
        let css_dir = temp.path().join("tools/styles");
        fs::create_dir_all(&css_dir).unwrap();
        fs::write(css_dir.join("custom.css"), "body { color: red; }").unwrap();

        let jupyter_dir = temp.path().join("jupyter-config");
        let reported = jupyter_dir.to_string_lossy().into_owned();
        let runner = ScriptedRunner::new(move |_| ok(&reported));
        let setup = EnvironmentSetup::new(runner, SetupConfig::default(), temp.path());

        let report = setup.setup_custom_css().unwrap();
        assert!(report.succeeded);
        let dest = jupyter_dir.join("custom/custom.css");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "body { color: red; }");

        let again = setup.setup_custom_css().unwrap();
        assert!(again.notes.iter().any(|n| n.starts_with("Backed up")));
    }

    #[test]
    fn test_missing_css_fails_step() {
        let temp = project();
        let setup = EnvironmentSetup::new(ScriptedRunner::succeeding(), SetupConfig::default(), temp.path());
        let report = setup.setup_custom_css().unwrap();
        assert!(!report.succeeded);
        assert!(setup.runner().calls().is_empty());
    }

    #[test]
    fn test_run_continues_after_failures() {
        let temp = project();
        let runner = ScriptedRunner::new(|call| {
            if call.iter().any(|a| a == "pip" || a == "import pandas") {
                fail("boom")
            } else {
                ok("")
            }
        });
        let setup = EnvironmentSetup::new(runner, SetupConfig::default(), temp.path());
        let mut recorder = Recorder::default();
        let reports = setup.run(&SetupStep::ALL, &mut recorder);

        assert_eq!(reports.len(), 5);
        assert_eq!(
            recorder.finished,
            vec![
                (SetupStep::Requirements, false),
                (SetupStep::Extensions, true),
                (SetupStep::Kernel, true),
                (SetupStep::CustomCss, false),
                (SetupStep::Verify, false),
            ]
        );
        assert_eq!(recorder.started[4], (5, 5, SetupStep::Verify));

        let verify = &reports[4];
        let missing: Vec<&str> = verify
            .checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(missing, vec!["pandas"]);
    }

    #[test]
    fn test_run_subset() {
        let temp = project();
        let setup = EnvironmentSetup::new(ScriptedRunner::succeeding(), SetupConfig::default(), temp.path());
        let reports = setup.run(&[SetupStep::Kernel], &mut ());
        assert_eq!(reports.len(), 1);
        assert_eq!(setup.runner().calls().len(), 1);
    }
}
