use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The reason a line of user input was not accepted. Interactive callers decide whether to
/// re-prompt or to discard the record being entered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("No value was entered")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is negative, please enter a valid positive number")]
    Negative(String),

    #[error("'{0}' is too large, the largest accepted amount is 1,000,000,000,000,000")]
    TooLarge(String),

    #[error("'{input}' is not a known category, expected one of: {expected}")]
    UnknownCategory { input: String, expected: String },
}
