//! Blocking subprocess execution for external tools
//!
//! One policy for the whole catalog: a wrapper ALWAYS returns the
//! completed-process summary, and a non-zero exit status is data for the
//! caller, not an error. Errors are reserved for spawn failures — a binary
//! that cannot be resolved has no exit status to report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use strand_core::system::paths::strand_config_path;
use strand_core::{Config, StrandError, StrandResult};

/// Program name plus argument list, built by a wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Append whitespace-separated extra flags (the `extra` param most
    /// wrappers accept)
    pub fn extra(mut self, extra: Option<&str>) -> Self {
        if let Some(extra) = extra {
            self.args.extend(extra.split_whitespace().map(String::from));
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }
}

/// Summary of one completed external-tool invocation
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub program: String,
    pub binary_path: PathBuf,
    pub args: Vec<String>,
    /// Exit code of the child, None when killed by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub started_at: DateTime<Utc>,
}

/// Resolve a program name to a binary path.
///
/// Config overrides win over PATH lookup; a miss reports how to fix it.
pub fn resolve_binary(program: &str) -> StrandResult<PathBuf> {
    let config = Config::load_default()?;
    if let Some(path) = config.tools.overrides.get(program) {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(StrandError::Configuration(format!(
            "configured path for {} does not exist: {}",
            program,
            path.display()
        )));
    }
    which::which(program).map_err(|_| StrandError::ToolMissing {
        tool: program.to_string(),
        hint: format!(
            "Install {} and ensure it is on PATH, or set [tools.overrides] in {}",
            program,
            strand_config_path().display()
        ),
    })
}

/// Check whether a program can be resolved at all
pub fn is_available(program: &str) -> bool {
    resolve_binary(program).is_ok()
}

/// Run the command to completion, capturing output.
///
/// Blocks until the child exits; no timeout is imposed at this layer.
pub fn run(spec: &CommandSpec) -> StrandResult<RunSummary> {
    let binary_path = resolve_binary(spec.program())?;
    let started_at = Utc::now();
    debug!(program = spec.program(), args = ?spec.argv(), "invoking external tool");

    let output = Command::new(&binary_path)
        .args(spec.argv())
        .output()
        .map_err(|e| {
            StrandError::Execution(format!("failed to spawn {}: {}", spec.program(), e))
        })?;

    Ok(RunSummary {
        program: spec.program().to_string(),
        binary_path,
        args: spec.argv().to_vec(),
        exit_code: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        started_at,
    })
}
