//! coursekit-setup - Environment setup for coursekit
//!
//! This crate prepares a machine for the course notebooks and checks the
//! result.
//!
//! ## Features
//!
//! - Best-effort setup steps (pip requirements, notebook extensions,
//!   kernel, custom CSS, package verification)
//! - Tool detection
//! - Verification checks shared with `coursekit doctor`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coursekit_setup::{EnvironmentSetup, SetupStep};
//! use coursekit_core::process::SystemRunner;
//!
//! let setup = EnvironmentSetup::new(SystemRunner, config.setup.clone(), ".");
//! setup.check_preconditions()?;
//! let reports = setup.run(&SetupStep::ALL, &mut observer);
//! ```

pub mod detection;
pub mod steps;
pub mod verification;

pub use detection::{detect_python, jupyter_config_dir, tool_version};
pub use steps::{CommandLog, EnvironmentSetup, SetupObserver, SetupStep, StepReport};
pub use verification::VerificationResult;

#[cfg(test)]
pub(crate) mod test_support {
    use coursekit_core::process::{CommandOutput, CommandRunner};
    use coursekit_core::Result;
    use std::cell::RefCell;
    use std::ffi::OsString;

    type Responder = Box<dyn Fn(&[String]) -> CommandOutput>;

    /// Answers every command with the responder's output and records it
    pub struct ScriptedRunner {
        pub calls: RefCell<Vec<Vec<String>>>,
        responder: Responder,
    }

    impl ScriptedRunner {
        pub fn new(responder: impl Fn(&[String]) -> CommandOutput + 'static) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        pub fn succeeding() -> Self {
            Self::new(|_| ok(""))
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
            let output = (self.responder)(&call);
            self.calls.borrow_mut().push(call);
            Ok(output)
        }
    }

    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn fail(stderr: &str) -> CommandOutput {
        CommandOutput {
            success: false,
            code: Some(1),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}
