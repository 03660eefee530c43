use mediadir_index::IndexError;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowseError>;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("unknown node {0}")]
    UnknownNode(String),

    /// The result document cannot be produced; the whole browse is aborted.
    #[error("cannot process browse request: {0}")]
    CannotProcess(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BrowseError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// ContentDirectory error code reported to protocol clients.
    pub fn upnp_code(&self) -> u16 {
        match self {
            BrowseError::UnknownNode(_) => 701,
            BrowseError::CannotProcess(_) => 720,
            BrowseError::Io { .. } => 501,
        }
    }
}

impl From<IndexError> for BrowseError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::UnknownNode(id) => BrowseError::UnknownNode(id),
        }
    }
}
