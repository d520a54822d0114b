//! Notebook templates
//!
//! The registry maps each [`TemplateKind`](crate::types::TemplateKind) to a
//! template file; the materializer copies a template to a new notebook.

mod materializer;
mod registry;

pub use materializer::NotebookMaterializer;
pub use registry::TemplateRegistry;
