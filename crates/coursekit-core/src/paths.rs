//! Canonical notebook locations for chapters and practicals

use crate::config::LayoutConfig;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Lower-case a title and turn spaces into hyphens.
///
/// No other characters are touched.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Directory and file name of a notebook to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl NotebookTarget {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// State of a target directory after [`prepare_dir`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Existing,
    Created,
}

/// Make sure `dir` exists, reporting whether it had to be created
pub fn prepare_dir(dir: &Path) -> Result<DirStatus> {
    if dir.is_dir() {
        return Ok(DirStatus::Existing);
    }
    warn!("Directory {} doesn't exist, creating it", dir.display());
    fs::create_dir_all(dir)?;
    Ok(DirStatus::Created)
}

/// Naming policies for course notebooks
#[derive(Debug, Clone)]
pub struct PathSynthesizer {
    layout: LayoutConfig,
}

impl PathSynthesizer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn default_course(&self) -> &str {
        &self.layout.default_course
    }

    /// `notebooks/<course>/<NN>-Chapter-<NN>/chapter-<NN>[-<slug>].ipynb`
    pub fn chapter(&self, number: u32, course: Option<&str>, title: Option<&str>) -> NotebookTarget {
        let course = course.unwrap_or(self.layout.default_course.as_str());
        let dir = self
            .layout
            .notebooks_dir
            .join(course)
            .join(format!("{:02}-Chapter-{:02}", number, number));

        let file_name = match non_empty(title) {
            Some(title) => format!("chapter-{:02}-{}.ipynb", number, slugify(title)),
            None => format!("chapter-{:02}.ipynb", number),
        };

        NotebookTarget { dir, file_name }
    }

    /// `notebooks/<course>/Practicals/P<NN>-<slug or practical-N>.ipynb`
    pub fn practical(&self, number: u32, title: Option<&str>) -> NotebookTarget {
        let dir = self
            .layout
            .notebooks_dir
            .join(&self.layout.practicals_course)
            .join(&self.layout.practicals_dir);

        let file_name = match non_empty(title) {
            Some(title) => format!("P{:02}-{}.ipynb", number, slugify(title)),
            None => format!("P{:02}-practical-{}.ipynb", number, number),
        };

        NotebookTarget { dir, file_name }
    }

    /// Directory holding every notebook of a course
    pub fn course_dir(&self, course: &str) -> PathBuf {
        self.layout.notebooks_dir.join(course)
    }
}

impl Default for PathSynthesizer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

fn non_empty(title: Option<&str>) -> Option<&str> {
    title.filter(|t| !t.is_empty())
}
