//! Per-player score ledger.
//!
//! A [`Player`] keeps one [`GameLedger`] per game. Ledgers only grow: every
//! finished attempt or round is appended and its points added to the total.

use serde::{Deserialize, Serialize};

use crate::checker::AttemptRecord;
use crate::guesser::GuessResult;
use crate::quiz::QuizResult;

/// Default display name for a fresh player.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Ordered history and cumulative score for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLedger<T> {
    history: Vec<T>,
    score: u32,
}

impl<T> Default for GameLedger<T> {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            score: 0,
        }
    }
}

impl<T> GameLedger<T> {
    /// Append a record and add `points` to the total.
    pub fn record(&mut self, entry: T, points: u32) {
        self.history.push(entry);
        self.score = self.score.saturating_add(points);
    }

    pub fn history(&self) -> &[T] {
        &self.history
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[T] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }
}

/// The session's player and their ledgers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub answer_checker: GameLedger<AttemptRecord>,
    pub number_guesser: GameLedger<GuessResult>,
    pub memory_bank: GameLedger<QuizResult>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answer_checker: GameLedger::default(),
            number_guesser: GameLedger::default(),
            memory_bank: GameLedger::default(),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}
