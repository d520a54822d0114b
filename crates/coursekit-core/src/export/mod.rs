//! Notebook export
//!
//! This module hands notebooks to an external document converter
//! (`jupyter nbconvert` by default).
//!
//! # Overview
//!
//! - [`ExportDispatcher`] converts a single notebook, inferring the output
//!   directory from course markers in the notebook path.
//! - [`BatchWalker`] applies an export or an output-clear to every notebook
//!   in a directory, one after the other.
//!
//! # Example
//!
//! ```ignore
//! use coursekit_core::export::{ExportDispatcher, BatchWalker, NoopObserver};
//! use coursekit_core::process::SystemRunner;
//!
//! let dispatcher = ExportDispatcher::new(SystemRunner, &config.export);
//! let html = dispatcher.export(path, ExportFormat::Html, None)?;
//!
//! let walker = BatchWalker::new(&dispatcher, &config.export.exclude_patterns)?;
//! let result = walker.export_all(dir, ExportFormat::Pdf, None, true, &mut NoopObserver)?;
//! ```

mod batch;
mod dispatcher;

pub use batch::{find_notebooks, BatchObserver, BatchResult, BatchWalker, NoopObserver};
pub use dispatcher::{output_file_name, ExportDispatcher, ExportOutcome};
