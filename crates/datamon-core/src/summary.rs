//! Session summary built from a player's ledgers.

use serde::{Deserialize, Serialize};

use crate::checker::AttemptRecord;
use crate::guesser::GuessResult;
use crate::ledger::{GameLedger, Player};
use crate::quiz::QuizResult;

/// How many recent math attempts the summary lists.
pub const RECENT_ATTEMPTS: usize = 10;
/// How many recent guesser rounds and quizzes the summary lists.
pub const RECENT_ROUNDS: usize = 5;

/// Score, record count, and the most recent records of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary<T> {
    pub score: u32,
    pub count: usize,
    pub recent: Vec<T>,
}

impl<T: Clone> GameSummary<T> {
    fn from_ledger(ledger: &GameLedger<T>, recent: usize) -> Self {
        Self {
            score: ledger.score(),
            count: ledger.len(),
            recent: ledger.recent(recent).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub answer_checker: GameSummary<AttemptRecord>,
    pub number_guesser: GameSummary<GuessResult>,
    pub memory_bank: GameSummary<QuizResult>,
}

impl SessionSummary {
    pub fn from_player(player: &Player) -> Self {
        Self {
            player_name: player.name.clone(),
            answer_checker: GameSummary::from_ledger(&player.answer_checker, RECENT_ATTEMPTS),
            number_guesser: GameSummary::from_ledger(&player.number_guesser, RECENT_ROUNDS),
            memory_bank: GameSummary::from_ledger(&player.memory_bank, RECENT_ROUNDS),
        }
    }

    /// Sum of the three game scores.
    pub fn total_score(&self) -> u32 {
        self.answer_checker.score + self.number_guesser.score + self.memory_bank.score
    }
}
