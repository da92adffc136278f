use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Unknown card label: {0}")]
    UnknownLabel(String),
    #[error("Confidence {0} outside [0, 1]")]
    ConfidenceOutOfRange(f32),
    #[error("Unsupported player count: {0} (seat map covers 1 or 2 players)")]
    UnsupportedPlayerCount(usize),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed frame document: {0}")]
    MalformedFrame(String),
}
