use thiserror::Error;

pub type CometResult<T> = Result<T, CometError>;

#[derive(Error, Debug)]
pub enum CometError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plugin scan error: {0}")]
    Scan(String),

    #[error("Metadata store error: {0}")]
    Store(String),

    #[error("Probe error: {0}")]
    Probe(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
