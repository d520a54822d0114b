//! Template lookup table

use crate::config::TemplatesConfig;
use crate::error::Result;
use crate::types::TemplateKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed mapping from template kind to template file.
///
/// Built once from configuration; there is no way to add or change entries
/// afterwards.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<TemplateKind, PathBuf>,
}

impl TemplateRegistry {
    pub fn new(config: &TemplatesConfig) -> Self {
        let templates = TemplateKind::ALL
            .iter()
            .map(|&kind| {
                let file = match kind {
                    TemplateKind::Chapter => &config.chapter,
                    TemplateKind::Practical => &config.practical,
                    TemplateKind::Notes => &config.notes,
                };
                (kind, config.dir.join(file))
            })
            .collect();

        Self { templates }
    }

    /// Template file for a known kind
    pub fn get(&self, kind: TemplateKind) -> &Path {
        // Every kind is inserted by `new`.
        &self.templates[&kind]
    }

    /// Resolve a kind by name, failing with the list of known kinds
    pub fn lookup(&self, name: &str) -> Result<(TemplateKind, &Path)> {
        let kind: TemplateKind = name.parse()?;
        Ok((kind, self.get(kind)))
    }

    /// All entries in kind order
    pub fn iter(&self) -> impl Iterator<Item = (TemplateKind, &Path)> {
        self.templates.iter().map(|(k, p)| (*k, p.as_path()))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(&TemplatesConfig::default())
    }
}
