use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::naming::PathSegments;

/// Rejected run configuration. Raised before any sweep work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure while turning one combination into an on-disk submission script.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("failed to create job directory '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to resolve absolute path for '{}': {source}", .path.display())]
    ResolvePath { path: PathBuf, source: io::Error },
    #[error("failed to write submission script '{}': {source}", .path.display())]
    WriteScript { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The sweep stopped at `active_path`; earlier combinations stay written
    /// and submitted.
    #[error("sweep aborted at '{active_path}': {source}")]
    Aborted {
        active_path: PathSegments,
        source: MaterializeError,
    },
}
