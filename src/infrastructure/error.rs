//! Errors of the outer shell: raw filesystem access outside the services.

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

/// A service failure, or an I/O step the CLI performs itself
/// (reading the working directory, writing a config template).
#[derive(Error, Debug)]
pub enum InfraError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("cannot {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    /// Wraps `source`, naming what was attempted (`"write .cuecard.toml"`).
    pub fn io(action: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }
}
