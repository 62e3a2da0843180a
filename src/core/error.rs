use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Participant not found: {0:?}")]
    ParticipantNotFound(crate::core::types::ParticipantId),

    #[error("Team index out of range: {index} (team count {count})")]
    TeamOutOfRange { index: usize, count: usize },

    #[error("Invalid camera config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
