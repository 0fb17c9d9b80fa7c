//! Error types for rejected operations
//!
//! Game-terminal outcomes (collisions, lost rounds) are states, not errors.
//! These cover operations a caller asked for that were refused and left the
//! state untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("no column with id `{0}`")]
    UnknownColumn(String),
    #[error("no card with id `{0}` in that column")]
    UnknownCard(String),
    #[error("the last column cannot be removed")]
    LastColumn,
    #[error("board is inconsistent: {0}")]
    Inconsistent(String),
    #[error("board JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordleError {
    #[error("guess must be 5 letters, got {0}")]
    WrongLength(usize),
    #[error("`{0}` is not a letter")]
    NotAlphabetic(char),
    #[error("current guess is incomplete")]
    IncompleteGuess,
    #[error("round is over")]
    GameFinished,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing settings: {0}")]
    Parse(#[from] serde_json::Error),
}
