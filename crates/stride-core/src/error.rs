use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrideError {
    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("No animation channel for state: {0}")]
    MissingChannel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrideError>;
