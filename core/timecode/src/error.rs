use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimecodeError {
    #[error("empty position")]
    Empty,
    #[error("'{text}' is not a time or sample count")]
    InvalidNumber { text: String },
    #[error("unexpected trailing characters '{rest}'")]
    TrailingCharacters { rest: String },
    #[error("'{text}' is too large")]
    Overflow { text: String },
}
