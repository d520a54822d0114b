//! Copy templates into new notebooks

use super::TemplateRegistry;
use crate::error::{CourseKitError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Creates notebooks by copying template files
#[derive(Debug, Clone)]
pub struct NotebookMaterializer {
    registry: TemplateRegistry,
}

impl NotebookMaterializer {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Copy the template for `kind` to `destination`.
    ///
    /// Missing parent directories are created and an existing file at
    /// `destination` is overwritten. Nothing is created when the kind is
    /// unknown or its template file is missing.
    pub fn materialize(&self, kind: &str, destination: &Path) -> Result<PathBuf> {
        let (kind, template) = self.registry.lookup(kind)?;

        if !template.is_file() {
            return Err(CourseKitError::TemplateNotFound(template.to_path_buf()));
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!("Created directory {:?}", parent);
            }
        }

        fs::copy(template, destination).map_err(|e| {
            CourseKitError::Io(e).with_context(format!(
                "Failed to copy {} to {}",
                template.display(),
                destination.display()
            ))
        })?;

        info!("Created {} notebook: {}", kind, destination.display());
        Ok(destination.to_path_buf())
    }
}
