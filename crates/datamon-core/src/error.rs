//! Error types for datamon.
//!
//! Nothing here is fatal: every variant describes a rejected request that
//! left the session untouched, so a front end can show the message and
//! keep going.

use std::path::PathBuf;

use thiserror::Error;

/// A rejected game or storage operation.
#[derive(Debug, Error)]
pub enum DatamonError {
    /// A required text field was blank after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A math round was requested with an unsupported number of problems.
    #[error("a round must have between 1 and {max} problems, got {requested}")]
    InvalidRoundSize { requested: u32, max: u32 },

    /// A guess fell outside the round's range.
    #[error("guess {guess} is outside {lo}..={hi}")]
    GuessOutOfRange { guess: i64, lo: i64, hi: i64 },

    /// The answer did not have the shape the problem asks for.
    #[error("expected {expected}")]
    AnswerShape { expected: &'static str },

    /// The round already reached its terminal state.
    #[error("round is over, start a new one")]
    RoundOver,

    /// No round of the named game is in progress.
    #[error("no {0} round in progress")]
    NoActiveRound(&'static str),

    /// The problem store could not be written.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures reading or writing the problem store file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping could not be converted to or from JSON.
    #[error("invalid problem data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DatamonError {
    /// Returns `true` if this is a misuse of a finished or missing round,
    /// as opposed to bad user input.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DatamonError::RoundOver | DatamonError::NoActiveRound(_))
    }
}
