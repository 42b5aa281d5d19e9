use std::path::Path;
use std::process::Command;

use gametes_sweep_core::{ConfigError, JobSubmitter};
use tracing::debug;

/// Runs the configured submission command with the script path appended.
///
/// `qsub` hands the job to PBS; `bash` runs it on the local machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSubmitter {
    program: String,
    args: Vec<String>,
}

impl CommandSubmitter {
    /// Splits `command_line` on whitespace, e.g. `qsub -V`.
    pub fn from_command_line(command_line: &str) -> Result<Self, ConfigError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ConfigError::new("qsubCmd cannot be empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl JobSubmitter for CommandSubmitter {
    fn submit(&self, script_path: &Path) -> Result<(), String> {
        debug!(
            program = %self.program,
            script = %script_path.display(),
            "running submission command"
        );
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(script_path)
            .status()
            .map_err(|error| format!("failed to execute '{}': {error}", self.program))?;

        if !status.success() {
            return Err(format!("'{}' exited with {status}", self.program));
        }
        Ok(())
    }
}
