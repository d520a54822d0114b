//! Single-notebook export through the converter

use crate::config::{ExportConfig, OutputRoute};
use crate::error::{CourseKitError, Result};
use crate::process::CommandRunner;
use crate::types::ExportFormat;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of one export or clear request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Converter exited successfully; `output` is the file it was told to write
    Succeeded { output: PathBuf },
    /// Request failed; `error` is the reported cause
    Failed { error: String },
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Succeeded { .. })
    }
}

impl From<Result<PathBuf>> for ExportOutcome {
    fn from(result: Result<PathBuf>) -> Self {
        match result {
            Ok(output) => ExportOutcome::Succeeded { output },
            Err(e) => ExportOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// `<stem><suffix>` for a notebook exported to `format`
pub fn output_file_name(notebook: &Path, format: ExportFormat) -> String {
    let stem = notebook
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", stem, format.file_suffix())
}

/// Runs the document converter for single notebooks
pub struct ExportDispatcher<R> {
    runner: R,
    converter: String,
    converter_args: Vec<String>,
    routes: Vec<OutputRoute>,
    fallback_dir: PathBuf,
}

impl<R: CommandRunner> ExportDispatcher<R> {
    pub fn new(runner: R, config: &ExportConfig) -> Self {
        Self {
            runner,
            converter: config.converter.clone(),
            converter_args: config.converter_args.clone(),
            routes: config.routes.clone(),
            fallback_dir: config.fallback_dir.clone(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Default report directory for a notebook.
    ///
    /// The first route whose marker occurs anywhere in the path wins;
    /// otherwise the fallback directory is used.
    pub fn infer_output_dir(&self, notebook: &Path) -> PathBuf {
        self.matching_route(notebook)
            .map(|route| route.reports_dir.clone())
            .unwrap_or_else(|| self.fallback_dir.clone())
    }

    /// Default directory for extracted code
    pub fn infer_code_dir(&self, notebook: &Path) -> PathBuf {
        self.matching_route(notebook)
            .map(|route| route.code_dir.clone())
            .unwrap_or_else(|| self.fallback_dir.clone())
    }

    fn matching_route(&self, notebook: &Path) -> Option<&OutputRoute> {
        let path = notebook.to_string_lossy();
        self.routes
            .iter()
            .find(|route| path.contains(route.marker.as_str()))
    }

    /// Convert `notebook` to `format`, returning the output path.
    ///
    /// The produced file is not checked; success means the converter
    /// exited with status zero.
    pub fn export(
        &self,
        notebook: &Path,
        format: ExportFormat,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        if !notebook.exists() {
            return Err(CourseKitError::NotebookNotFound(notebook.to_path_buf()));
        }

        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.infer_output_dir(notebook));
        self.convert(notebook, format, &output_dir)
    }

    /// Same as [`export`](Self::export) for a format given by name.
    ///
    /// Unknown names fail before any process is started.
    pub fn export_named(
        &self,
        notebook: &Path,
        format: &str,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        if !notebook.exists() {
            return Err(CourseKitError::NotebookNotFound(notebook.to_path_buf()));
        }
        let format: ExportFormat = format.parse()?;
        self.export(notebook, format, output_dir)
    }

    /// Export the code cells as a script into the course's code directory
    pub fn extract_code(&self, notebook: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
        if !notebook.exists() {
            return Err(CourseKitError::NotebookNotFound(notebook.to_path_buf()));
        }
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.infer_code_dir(notebook));
        self.convert(notebook, ExportFormat::Script, &output_dir)
    }

    /// Strip all cell outputs from a notebook in place
    pub fn clear_outputs(&self, notebook: &Path) -> Result<PathBuf> {
        if !notebook.exists() {
            return Err(CourseKitError::NotebookNotFound(notebook.to_path_buf()));
        }

        let mut args = self.base_args();
        args.push("--clear-output".into());
        args.push("--inplace".into());
        args.push(notebook.as_os_str().to_os_string());

        self.runner.run_checked(&self.converter, &args)?;
        info!("Cleaned outputs from: {}", notebook.display());
        Ok(notebook.to_path_buf())
    }

    fn convert(&self, notebook: &Path, format: ExportFormat, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let output_file = output_dir.join(output_file_name(notebook, format));

        let mut args = self.base_args();
        args.push("--to".into());
        args.push(format.as_str().into());
        args.push(notebook.as_os_str().to_os_string());
        args.push("--output".into());
        args.push(output_file.as_os_str().to_os_string());

        info!("Exporting {} to {}...", notebook.display(), format);
        self.runner.run_checked(&self.converter, &args)?;
        info!("Exported to: {}", output_file.display());
        Ok(output_file)
    }

    fn base_args(&self) -> Vec<OsString> {
        self.converter_args.iter().map(OsString::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::recording::RecordingRunner;
    use pretty_assertions::assert_eq;

    struct Fixture {
        temp: tempfile::TempDir,
        dispatcher: ExportDispatcher<RecordingRunner>,
    }

    fn fixture(runner: RecordingRunner) -> Fixture {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ExportConfig::default();
        config.fallback_dir = temp.path().join("outputs");
        for route in &mut config.routes {
            route.reports_dir = temp.path().join(&route.reports_dir);
            route.code_dir = temp.path().join(&route.code_dir);
        }
        Fixture {
            temp,
            dispatcher: ExportDispatcher::new(runner, &config),
        }
    }

    fn notebook(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{}").unwrap();
        path
    }

    #[test]
    fn test_output_file_names() {
        let nb = Path::new("notebooks/DPP/chapter-01.ipynb");
        assert_eq!(output_file_name(nb, ExportFormat::Html), "chapter-01.html");
        assert_eq!(output_file_name(nb, ExportFormat::Slides), "chapter-01_slides.html");
        assert_eq!(output_file_name(nb, ExportFormat::Markdown), "chapter-01.md");
    }

    #[test]
    fn test_infer_output_dir() {
        let dispatcher = ExportDispatcher::new(RecordingRunner::default(), &ExportConfig::default());
        assert_eq!(
            dispatcher.infer_output_dir(Path::new("notebooks/DPP/01/a.ipynb")),
            PathBuf::from("outputs/DPP/reports")
        );
        assert_eq!(
            dispatcher.infer_output_dir(Path::new("notebooks/ECP/a.ipynb")),
            PathBuf::from("outputs/ECP/exports")
        );
        assert_eq!(
            dispatcher.infer_output_dir(Path::new("scratch/a.ipynb")),
            PathBuf::from("outputs")
        );
        // First matching route wins
        assert_eq!(
            dispatcher.infer_output_dir(Path::new("ECP/DPP/a.ipynb")),
            PathBuf::from("outputs/DPP/reports")
        );
        assert_eq!(
            dispatcher.infer_code_dir(Path::new("notebooks/ECP/a.ipynb")),
            PathBuf::from("outputs/ECP/code")
        );
    }

    #[test]
    fn test_export_slides_to_course_reports() {
        let fx = fixture(RecordingRunner::default());
        let nb = notebook(fx.temp.path(), "notebooks/DPP/lecture.ipynb");

        let output = fx.dispatcher.export(&nb, ExportFormat::Slides, None).unwrap();
        let expected = fx.temp.path().join("outputs/DPP/reports/lecture_slides.html");
        assert_eq!(output, expected);
        assert!(expected.parent().unwrap().is_dir());

        let calls = fx.dispatcher.runner().calls.borrow();
        assert_eq!(
            calls[0],
            vec![
                "jupyter".to_string(),
                "nbconvert".to_string(),
                "--to".to_string(),
                "slides".to_string(),
                nb.to_string_lossy().into_owned(),
                "--output".to_string(),
                expected.to_string_lossy().into_owned(),
            ]
        );
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let fx = fixture(RecordingRunner::default());
        let nb = notebook(fx.temp.path(), "notebooks/DPP/lecture.ipynb");
        let out = fx.temp.path().join("custom");

        let output = fx.dispatcher.export(&nb, ExportFormat::Pdf, Some(&out)).unwrap();
        assert_eq!(output, out.join("lecture.pdf"));
    }

    #[test]
    fn test_missing_notebook_runs_nothing() {
        let fx = fixture(RecordingRunner::default());
        let err = fx
            .dispatcher
            .export(&fx.temp.path().join("nope.ipynb"), ExportFormat::Html, None)
            .unwrap_err();
        assert!(matches!(err, CourseKitError::NotebookNotFound(_)));
        assert_eq!(fx.dispatcher.runner().call_count(), 0);
    }

    #[test]
    fn test_unknown_format_runs_nothing() {
        let fx = fixture(RecordingRunner::default());
        let nb = notebook(fx.temp.path(), "a.ipynb");
        let err = fx.dispatcher.export_named(&nb, "docx", None).unwrap_err();
        assert!(matches!(err, CourseKitError::UnsupportedFormat(_)));
        assert_eq!(fx.dispatcher.runner().call_count(), 0);
    }

    #[test]
    fn test_converter_failure_is_reported() {
        let fx = fixture(RecordingRunner::failing_on("broken"));
        let nb = notebook(fx.temp.path(), "broken.ipynb");
        let err = fx.dispatcher.export(&nb, ExportFormat::Html, None).unwrap_err();
        match err {
            CourseKitError::Command { message, .. } => assert_eq!(message, "conversion failed"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fx.dispatcher.runner().call_count(), 1);
    }

    #[test]
    fn test_extract_code_uses_code_route() {
        let fx = fixture(RecordingRunner::default());
        let nb = notebook(fx.temp.path(), "notebooks/ECP/week1.ipynb");
        let output = fx.dispatcher.extract_code(&nb, None).unwrap();
        assert_eq!(output, fx.temp.path().join("outputs/ECP/code/week1.py"));
    }

    #[test]
    fn test_clear_outputs_command_shape() {
        let fx = fixture(RecordingRunner::default());
        let nb = notebook(fx.temp.path(), "a.ipynb");
        fx.dispatcher.clear_outputs(&nb).unwrap();
        let calls = fx.dispatcher.runner().calls.borrow();
        assert_eq!(
            &calls[0][1..4],
            &["nbconvert", "--clear-output", "--inplace"]
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: ExportOutcome = Ok(PathBuf::from("a.html")).into();
        assert!(ok.is_success());
        let failed: ExportOutcome = Err(CourseKitError::UnsupportedFormat("x".into())).into();
        assert!(!failed.is_success());
    }
}
