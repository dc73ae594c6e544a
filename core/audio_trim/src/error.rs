use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration failures. Positions are 1-based, as the user wrote them.
#[derive(Debug, Error)]
pub enum TrimError {
    #[error("position {position} '{text}' is not valid: {source}")]
    InvalidSyntax {
        position: usize,
        text: String,
        #[source]
        source: BoxError,
    },
    #[error("position {position} '{text}' could not be resolved: {source}")]
    InvalidPosition {
        position: usize,
        text: String,
        #[source]
        source: BoxError,
    },
    #[error("signal has no channels")]
    NoChannels,
    #[error("can't use positions relative to end: audio length is unknown")]
    LengthRequired,
    #[error("position {position} is before start of audio")]
    PositionBeforeStart { position: usize },
    #[error("position {position} is too far from the start of audio")]
    PositionOverflow { position: usize },
    #[error("audio length of {length} frames is too long to count in samples")]
    LengthOverflow { length: u64 },
    #[error("position {position} is behind the preceding position")]
    MarkersOutOfOrder { position: usize },
    #[error("start position {offset} is after end of audio ({length} frames)")]
    StartBeyondEnd { offset: u64, length: u64 },
    #[error("end position {offset} is after end of audio ({length} frames)")]
    EndBeyondEnd { offset: u64, length: u64 },
}
