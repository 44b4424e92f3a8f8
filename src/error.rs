use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the engines and the configuration layer.
///
/// A wrong drop or a second answer is not an error: those come back as
/// events (or as an empty event list).
#[derive(Debug, Error)]
pub enum Error {
    /// No slot with this id exists on the board.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    /// Slot layout that cannot be completed exactly once per part.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The identifier does not name any part.
    #[error("unknown part: {0}")]
    UnknownPart(String),

    /// Option index is outside the current question's options.
    #[error("no option #{index} (question has {len})")]
    NoSuchOption { index: usize, len: usize },

    /// Session points past its question list (e.g. a corrupted stored state).
    #[error("question #{index} does not exist (quiz has {len})")]
    NoSuchQuestion { index: usize, len: usize },

    /// A quiz needs at least one question.
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// Bad environment value.
    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
