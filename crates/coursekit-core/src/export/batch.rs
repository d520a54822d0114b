//! Directory-wide export and output clearing

use super::dispatcher::{ExportDispatcher, ExportOutcome};
use crate::error::{CourseKitError, Result};
use crate::paths::PathSynthesizer;
use crate::process::CommandRunner;
use crate::types::ExportFormat;
use globset::{Glob, GlobMatcher, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Tally of one directory walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Notebooks the walk tried to process
    pub attempted: usize,
    /// Notebooks processed successfully
    pub succeeded: usize,
    /// Sources that failed, in walk order
    pub failed: Vec<PathBuf>,
}

impl BatchResult {
    pub fn failed_count(&self) -> usize {
        self.attempted - self.succeeded
    }

    pub fn all_succeeded(&self) -> bool {
        self.attempted == self.succeeded
    }

    fn record(&mut self, notebook: &Path, outcome: &ExportOutcome) {
        self.attempted += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed.push(notebook.to_path_buf());
        }
    }
}

/// Progress callbacks for a directory walk
pub trait BatchObserver {
    /// Notebooks were found and processing is about to begin
    fn on_start(&mut self, _total: usize) {}

    /// No notebook matched; nothing will run
    fn on_empty(&mut self, _dir: &Path) {}

    /// One notebook has been processed
    fn on_item(&mut self, _notebook: &Path, _outcome: &ExportOutcome) {}

    fn on_finish(&mut self, _result: &BatchResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Notebook files under `dir`, sorted.
///
/// Only the top level is searched unless `recursive` is set. Paths relative
/// to `dir` matching `exclude` are skipped, as are entries that cannot be
/// read.
pub fn find_notebooks(dir: &Path, recursive: bool, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CourseKitError::DirectoryNotFound(dir.to_path_buf()));
    }

    let matcher = notebook_matcher()?;
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut notebooks = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        // Links are not followed while walking, but a link to a file counts
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || !matcher.is_match(entry.file_name()) {
            continue;
        }
        let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        if exclude.is_match(rel) {
            continue;
        }
        notebooks.push(entry.into_path());
    }

    notebooks.sort();
    Ok(notebooks)
}

fn notebook_matcher() -> Result<GlobMatcher> {
    Ok(Glob::new("*.ipynb")?.compile_matcher())
}

fn build_exclude(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Applies the dispatcher to every notebook in a directory, sequentially
pub struct BatchWalker<'a, R> {
    dispatcher: &'a ExportDispatcher<R>,
    exclude: GlobSet,
}

impl<'a, R: CommandRunner> BatchWalker<'a, R> {
    pub fn new(dispatcher: &'a ExportDispatcher<R>, exclude_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            dispatcher,
            exclude: build_exclude(exclude_patterns)?,
        })
    }

    /// Notebooks this walker would process under `dir`
    pub fn notebooks(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        find_notebooks(dir, recursive, &self.exclude)
    }

    /// Export every notebook under `dir`.
    ///
    /// A failed export is recorded and the walk continues.
    pub fn export_all(
        &self,
        dir: &Path,
        format: ExportFormat,
        output_dir: Option<&Path>,
        recursive: bool,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchResult> {
        self.walk(dir, recursive, observer, |notebook| {
            self.dispatcher.export(notebook, format, output_dir)
        })
    }

    /// Clear outputs of every notebook under `dir`
    pub fn clear_outputs(
        &self,
        dir: &Path,
        recursive: bool,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchResult> {
        self.walk(dir, recursive, observer, |notebook| {
            self.dispatcher.clear_outputs(notebook)
        })
    }

    /// Extract code from every notebook under `dir`
    pub fn extract_code_all(
        &self,
        dir: &Path,
        output_dir: Option<&Path>,
        recursive: bool,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchResult> {
        self.walk(dir, recursive, observer, |notebook| {
            self.dispatcher.extract_code(notebook, output_dir)
        })
    }

    /// Recursively export all notebooks of one course
    pub fn export_course(
        &self,
        paths: &PathSynthesizer,
        course: &str,
        format: ExportFormat,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchResult> {
        let course_dir = paths.course_dir(course);
        if !course_dir.is_dir() {
            return Err(CourseKitError::DirectoryNotFound(course_dir)
                .with_context(format!("Course directory for '{}' not found", course)));
        }
        self.export_all(&course_dir, format, None, true, observer)
    }

    fn walk<F>(
        &self,
        dir: &Path,
        recursive: bool,
        observer: &mut dyn BatchObserver,
        mut apply: F,
    ) -> Result<BatchResult>
    where
        F: FnMut(&Path) -> Result<PathBuf>,
    {
        let notebooks = self.notebooks(dir, recursive)?;
        let mut result = BatchResult::default();

        if notebooks.is_empty() {
            warn!("No notebooks found in {}", dir.display());
            observer.on_empty(dir);
            return Ok(result);
        }

        info!("Found {} notebook(s)", notebooks.len());
        observer.on_start(notebooks.len());

        for notebook in &notebooks {
            let outcome = ExportOutcome::from(apply(notebook));
            if let ExportOutcome::Failed { error } = &outcome {
                warn!("{}: {}", notebook.display(), error);
            }
            result.record(notebook, &outcome);
            observer.on_item(notebook, &outcome);
        }

        info!(
            "Processed {}/{} notebooks successfully",
            result.succeeded, result.attempted
        );
        observer.on_finish(&result);
        Ok(result)
    }
}
