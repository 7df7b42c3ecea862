use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountdownError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Id prefix '{0}' matches more than one timer")]
    AmbiguousId(String),
    #[error("IO error: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize: {0:?}")]
    RonSerialize(#[from] ron::Error),
    #[error("Failed to parse stored data: {0:?}")]
    RonDeserialize(#[from] ron::error::SpannedError),
    #[error("Could not determine the project directories for this platform")]
    NoProjectDirs,
}
