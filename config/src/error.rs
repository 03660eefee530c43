use crate::RootCategory;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown {category} folder {id}")]
    UnknownNode { category: RootCategory, id: String },

    #[error("{category} folder with label {label:?} or path {path:?} already exists")]
    DuplicateFolder {
        category: RootCategory,
        label: String,
        path: String,
    },

    #[error("invalid folder: {0}")]
    InvalidFolder(String),

    #[error("could not locate the mediadir home directory")]
    HomeNotFound,
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
