//! coursekit - course notebook toolkit CLI
//!
//! Creates chapter, practical and notes notebooks from templates, exports
//! them through `jupyter nbconvert` and prepares a Jupyter environment.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write coursekit.toml and starter templates
//! coursekit init
//!
//! # New chapter notebook for the default course
//! coursekit create chapter 3 --title "Loops"
//!
//! # Export every notebook of a directory to HTML
//! coursekit export notebooks/DPP --recursive
//!
//! # Check the installation
//! coursekit doctor
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
