//! Number guesser rounds.
//!
//! The player guesses a secret drawn from the difficulty's range and gets a
//! "higher"/"lower" hint after each miss. A round ends on a correct guess or
//! when the tries run out; either way the result lands in the ledger.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DatamonError;
use crate::ledger::GameLedger;
use crate::model::Difficulty;

/// Points for a first-guess win before any bonus.
const BASE_POINTS: i64 = 100;
/// Points lost for every guess after the first.
const MISS_PENALTY: i64 = 10;
/// Floor on the base points of any win.
const MIN_POINTS: i64 = 10;
/// Extra points for winning within [`QUICK_WIN_GUESSES`] guesses.
const QUICK_WIN_BONUS: i64 = 20;
const QUICK_WIN_GUESSES: usize = 3;

/// Feedback attached to each guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    Higher,
    Lower,
    Correct,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Higher => write!(f, "higher"),
            Hint::Lower => write!(f, "lower"),
            Hint::Correct => write!(f, "correct"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub guess: i64,
    pub hint: Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRange {
    pub lo: i64,
    pub hi: i64,
}

/// A finished round, as kept in the number-guesser history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub timestamp: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub range: GuessRange,
    pub secret: i64,
    pub guesses: Vec<GuessEntry>,
    pub won: bool,
    pub attempts_used: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Still guessing.
    Playing,
    Won { points: u32 },
    /// Out of tries; reveals the secret.
    Exhausted { secret: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessFeedback {
    pub hint: Hint,
    pub tries_left: u32,
    pub outcome: GuessOutcome,
}

/// Points for a win on guess number `attempts_made` (1-based).
///
/// `max(10, 100 - 10 * (attempts_made - 1))`, plus 20 when the win took
/// three guesses or fewer.
pub fn points_for_win(attempts_made: usize) -> u32 {
    let misses = attempts_made.saturating_sub(1) as i64;
    let mut points = (BASE_POINTS - MISS_PENALTY * misses).max(MIN_POINTS);
    if attempts_made <= QUICK_WIN_GUESSES {
        points += QUICK_WIN_BONUS;
    }
    points as u32
}

/// An in-progress number guesser round.
#[derive(Debug, Clone)]
pub struct GuessRound {
    difficulty: Difficulty,
    lo: i64,
    hi: i64,
    tries_total: u32,
    tries_used: u32,
    secret: i64,
    guess_history: Vec<GuessEntry>,
    won: bool,
}

impl GuessRound {
    /// Start a round with a secret drawn uniformly from the preset's range.
    pub fn start<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let preset = difficulty.preset();
        let secret = rng.gen_range(preset.lo..=preset.hi);
        tracing::debug!(%difficulty, "guess round started");
        Self::new(difficulty, secret)
    }

    /// Start a round with a known secret, e.g. to replay a round.
    pub fn with_secret(difficulty: Difficulty, secret: i64) -> Result<Self, DatamonError> {
        let preset = difficulty.preset();
        if !(preset.lo..=preset.hi).contains(&secret) {
            return Err(DatamonError::GuessOutOfRange {
                guess: secret,
                lo: preset.lo,
                hi: preset.hi,
            });
        }
        Ok(Self::new(difficulty, secret))
    }

    fn new(difficulty: Difficulty, secret: i64) -> Self {
        let preset = difficulty.preset();
        Self {
            difficulty,
            lo: preset.lo,
            hi: preset.hi,
            tries_total: preset.tries,
            tries_used: 0,
            secret,
            guess_history: Vec::new(),
            won: false,
        }
    }

    /// Submit a guess.
    ///
    /// Out-of-range guesses and guesses after the round ended are rejected
    /// without using a try. A win or the final miss appends a
    /// [`GuessResult`] to `ledger`; only wins add points.
    pub fn submit(
        &mut self,
        guess: i64,
        ledger: &mut GameLedger<GuessResult>,
    ) -> Result<GuessFeedback, DatamonError> {
        if self.is_over() {
            return Err(DatamonError::RoundOver);
        }
        if !(self.lo..=self.hi).contains(&guess) {
            return Err(DatamonError::GuessOutOfRange {
                guess,
                lo: self.lo,
                hi: self.hi,
            });
        }

        self.tries_used += 1;

        let hint = if guess == self.secret {
            Hint::Correct
        } else if guess < self.secret {
            Hint::Higher
        } else {
            Hint::Lower
        };
        self.guess_history.push(GuessEntry { guess, hint });

        let outcome = if hint == Hint::Correct {
            self.won = true;
            let points = points_for_win(self.guess_history.len());
            tracing::info!(
                difficulty = %self.difficulty,
                attempts = self.tries_used,
                points,
                "guess round won"
            );
            ledger.record(self.result(points), points);
            GuessOutcome::Won { points }
        } else if self.tries_used == self.tries_total {
            tracing::info!(difficulty = %self.difficulty, secret = self.secret, "guess round lost");
            ledger.record(self.result(0), 0);
            GuessOutcome::Exhausted {
                secret: self.secret,
            }
        } else {
            GuessOutcome::Playing
        };

        Ok(GuessFeedback {
            hint,
            tries_left: self.tries_left(),
            outcome,
        })
    }

    fn result(&self, points: u32) -> GuessResult {
        GuessResult {
            timestamp: Utc::now(),
            difficulty: self.difficulty,
            range: GuessRange {
                lo: self.lo,
                hi: self.hi,
            },
            secret: self.secret,
            guesses: self.guess_history.clone(),
            won: self.won,
            attempts_used: self.tries_used,
            points,
        }
    }

    /// `true` once the round was won or ran out of tries.
    pub fn is_over(&self) -> bool {
        self.won || self.tries_used >= self.tries_total
    }

    pub fn tries_left(&self) -> u32 {
        self.tries_total - self.tries_used
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn range(&self) -> GuessRange {
        GuessRange {
            lo: self.lo,
            hi: self.hi,
        }
    }

    pub fn tries_total(&self) -> u32 {
        self.tries_total
    }

    pub fn tries_used(&self) -> u32 {
        self.tries_used
    }

    pub fn guess_history(&self) -> &[GuessEntry] {
        &self.guess_history
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// The secret, revealed only once the round is over.
    pub fn revealed_secret(&self) -> Option<i64> {
        self.is_over().then_some(self.secret)
    }
}
