use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bundled data file not found: {0}")]
    MissingData(String),

    #[error("Elapsed time must be positive, got {0}")]
    NonPositiveElapsed(f64),

    #[error("Player {player} has {actual} times but there are {expected} words")]
    ShapeMismatch {
        player: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Player {player} has a non-numeric time for word {word}")]
    NonNumericTime { player: usize, word: usize },

    #[error("Player {player} needs {expected} timestamps, got {actual}")]
    MissingTimestamps {
        player: usize,
        expected: usize,
        actual: usize,
    },

    #[error("word_index {index} out of range of {len} words")]
    WordIndexOutOfRange { index: usize, len: usize },

    #[error("player_num {index} out of range of {len} players")]
    PlayerIndexOutOfRange { index: usize, len: usize },

    #[error("Prompt must contain at least one word")]
    EmptyPrompt,

    #[error("Topics should be lowercase: {0:?}")]
    TopicNotLowercase(String),

    #[error("Typing session was finished before it was started")]
    SessionNotStarted,
}

pub type CatsResult<T> = Result<T, CatsError>;
