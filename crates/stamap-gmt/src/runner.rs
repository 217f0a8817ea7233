//! Process boundary for running GMT modules.

use crate::{GmtCall, GmtError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Default name of the GMT executable.
pub const DEFAULT_GMT_PROGRAM: &str = "gmt";

/// Runs GMT module calls.
///
/// All calls of one figure are issued through the same runner with the same
/// working directory, which is how GMT modern mode ties them into a session.
pub trait GmtRunner {
    /// Run `call` with `workdir` as the current directory.
    fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()>;
}

impl<R: GmtRunner + ?Sized> GmtRunner for &R {
    fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()> {
        (**self).run(call, workdir)
    }
}

impl<R: GmtRunner + ?Sized> GmtRunner for Box<R> {
    fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()> {
        (**self).run(call, workdir)
    }
}

static NEXT_SESSION: AtomicUsize = AtomicUsize::new(0);

/// Runs the `gmt` executable as a child process.
#[derive(Debug, Clone)]
pub struct GmtProcess {
    /// Executable to launch.
    program: PathBuf,
    /// Value of `GMT_SESSION_NAME` for every call.
    session_name: String,
}

impl Default for GmtProcess {
    fn default() -> Self {
        Self::new(DEFAULT_GMT_PROGRAM)
    }
}

impl GmtProcess {
    /// Create a runner for the given executable.
    ///
    /// Each runner gets its own session name so concurrent invocations do
    /// not share GMT's per-session state.
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        let session_name = format!(
            "stamap-{}-{}",
            std::process::id(),
            NEXT_SESSION.fetch_add(1, Ordering::Relaxed)
        );
        Self {
            program: program.as_ref().to_path_buf(),
            session_name,
        }
    }

    /// Get the executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Get the session name passed to GMT.
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// Query `gmt --version`.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|source| GmtError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(GmtError::CommandFailed {
                module: "--version".to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GmtRunner for GmtProcess {
    fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()> {
        debug!("{}", call);

        let output = Command::new(&self.program)
            .arg(&call.module)
            .args(&call.args)
            .current_dir(workdir)
            .env("GMT_SESSION_NAME", &self.session_name)
            .output()
            .map_err(|source| GmtError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(GmtError::CommandFailed {
                module: call.module.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            trace!(module = %call.module, "{}", stderr.trim());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_names_are_unique() {
        let a = GmtProcess::default();
        let b = GmtProcess::default();
        assert_ne!(a.session_name(), b.session_name());
        assert_eq!(a.program(), Path::new("gmt"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let runner = GmtProcess::new("/nonexistent/stamap-test/gmt");
        let dir = tempfile::tempdir().unwrap();
        match runner.run(&GmtCall::new("begin"), dir.path()) {
            Err(GmtError::Spawn { program, .. }) => assert!(program.ends_with("gmt")),
            other => panic!("expected spawn error, got {:?}", other),
        }
    }
}
