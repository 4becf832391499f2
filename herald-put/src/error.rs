//! Error types for herald-put.

use std::fmt;
use std::path::PathBuf;

use herald_core::{RemoteError, ValidationError};
use thiserror::Error;

/// Coarse classification of a [`PutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Io,
    Decode,
    Remote,
}

/// Which remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStep {
    SetStatus,
    DeletePreviousComments,
    PostComment,
}

impl fmt::Display for RemoteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteStep::SetStatus => "set status",
            RemoteStep::DeletePreviousComments => "delete previous comments",
            RemoteStep::PostComment => "post comment",
        })
    }
}

/// The first failure of a put invocation. Earlier remote calls stay applied.
#[derive(Debug, Error)]
pub enum PutError {
    /// `params` failed validation; nothing was read or sent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[source] ValidationError),

    /// The status file resolved to a value outside the allow-list.
    #[error("invalid status in status file: {0}")]
    InvalidStatusFile(#[source] ValidationError),

    /// A state document or override file could not be read.
    #[error("failed to read {what} at {path}: {source}")]
    Read {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state document is not valid JSON of the expected shape.
    #[error("failed to decode {what} at {path}: {source}")]
    Decode {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The remote service rejected a call.
    #[error("failed to {step}: {source}")]
    Remote {
        step: RemoteStep,
        #[source]
        source: RemoteError,
    },
}

impl PutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PutError::InvalidParameters(_) | PutError::InvalidStatusFile(_) => {
                ErrorKind::Validation
            }
            PutError::Read { .. } => ErrorKind::Io,
            PutError::Decode { .. } => ErrorKind::Decode,
            PutError::Remote { .. } => ErrorKind::Remote,
        }
    }
}

pub(crate) fn read_err(
    what: &'static str,
    path: impl Into<PathBuf>,
    source: std::io::Error,
) -> PutError {
    PutError::Read {
        what,
        path: path.into(),
        source,
    }
}

pub(crate) fn remote_err(step: RemoteStep) -> impl FnOnce(RemoteError) -> PutError {
    move |source| PutError::Remote { step, source }
}
