//! coursekit-styles - Presentation helpers for course notebooks
//!
//! Builders for the Markdown and HTML snippets used inside notebooks:
//! section headers, alerts, tables, exercises, progress bars and summaries.
//! Each helper returns a [`Rendered`] payload; showing it is left to the
//! notebook front end (see [`Rendered::to_mime_bundle`]).
//!
//! ```ignore
//! use coursekit_styles::{section_header, progress_bar};
//!
//! let header = section_header("Recursion", 2, Some("🔁"));
//! let bar = progress_bar(3, 8, "Exercises");
//! ```

mod html;
mod markdown;
mod rendered;
pub mod theme;

pub use html::{alert, progress_bar, solution, AlertKind};
pub use markdown::{
    code_block, comparison_table, exercise, key_points, objectives, section_header, summary,
    table,
};
pub use rendered::Rendered;
pub use theme::{color, Palette};
