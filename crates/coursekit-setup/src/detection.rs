//! Tool detection utilities
//!
//! Utilities for finding the interpreter and Jupyter installation.

use coursekit_core::process::{args, CommandRunner};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Interpreter names tried after the configured one
const PYTHON_FALLBACKS: [&str; 2] = ["python3", "python"];

/// First line printed by `<program> <args>`, if it runs successfully.
///
/// Some tools print their version on stderr, so both streams are checked.
pub fn tool_version<R: CommandRunner>(runner: &R, program: &str, extra: &[&str]) -> Option<String> {
    let output = runner.run(program, &args(extra)).ok()?;
    if !output.success {
        return None;
    }
    let text = if output.stdout.trim().is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    let line = text.lines().next().unwrap_or("").trim().to_string();
    Some(if line.is_empty() { "unknown".to_string() } else { line })
}

/// Find a working Python interpreter, preferring `preferred`.
///
/// Returns the program name and its version line.
pub fn detect_python<R: CommandRunner>(runner: &R, preferred: &str) -> Option<(String, String)> {
    let mut candidates = vec![preferred];
    candidates.extend(PYTHON_FALLBACKS.iter().filter(|c| **c != preferred));

    for candidate in candidates {
        if let Some(version) = tool_version(runner, candidate, &["--version"]) {
            debug!("Found python: {} ({})", candidate, version);
            return Some((candidate.to_string(), version));
        }
    }
    None
}

/// Jupyter configuration directory.
///
/// Asks `<jupyter> --config-dir`; falls back to `~/.jupyter`.
pub fn jupyter_config_dir<R: CommandRunner>(runner: &R, jupyter: &str) -> Option<PathBuf> {
    match runner.run(jupyter, &args(["--config-dir"])) {
        Ok(output) if output.success && !output.stdout.trim().is_empty() => {
            Some(PathBuf::from(output.stdout.trim()))
        }
        _ => {
            let fallback = dirs::home_dir().map(|h| h.join(".jupyter"));
            warn!(
                "Could not query {} --config-dir, using {:?}",
                jupyter, fallback
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fail, ok, ScriptedRunner};
    use coursekit_core::process::CommandOutput;

    #[test]
    fn test_tool_version_reads_stderr() {
        let runner = ScriptedRunner::new(|_| CommandOutput {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: "Python 2.7.18\n".to_string(),
        });
        assert_eq!(
            tool_version(&runner, "python", &["--version"]),
            Some("Python 2.7.18".to_string())
        );
    }

    #[test]
    fn test_detect_python_falls_back() {
        let runner = ScriptedRunner::new(|call| {
            if call[0] == "python" {
                ok("Python 3.11.4")
            } else {
                fail("not found")
            }
        });
        let (program, version) = detect_python(&runner, "py").unwrap();
        assert_eq!(program, "python");
        assert_eq!(version, "Python 3.11.4");
        let tried: Vec<String> = runner.calls().into_iter().map(|c| c[0].clone()).collect();
        assert_eq!(tried, vec!["py", "python3", "python"]);
    }

    #[test]
    fn test_detect_python_none() {
        let runner = ScriptedRunner::new(|_| fail("missing"));
        assert!(detect_python(&runner, "python3").is_none());
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_jupyter_config_dir() {
        let runner = ScriptedRunner::new(|_| ok("/home/student/.jupyter\n"));
        assert_eq!(
            jupyter_config_dir(&runner, "jupyter"),
            Some(PathBuf::from("/home/student/.jupyter"))
        );
    }
}
