use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("unknown node {0}")]
    UnknownNode(String),
}
