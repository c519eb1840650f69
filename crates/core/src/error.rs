use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripwireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TripwireError {
    fn from(e: serde_json::Error) -> Self {
        TripwireError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TripwireError>;
