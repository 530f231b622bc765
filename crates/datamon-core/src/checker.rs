//! Math checker rounds.
//!
//! A round serves `total_count` generated problems one at a time. Every
//! submitted answer is final: it is recorded, scored, and the round moves
//! on whether it was right or wrong.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DatamonError;
use crate::generator;
use crate::ledger::GameLedger;
use crate::model::{Answer, MathProblem, Operator};

/// Largest number of problems a single round may hold.
pub const MAX_ROUND_SIZE: u32 = 50;

/// One submitted answer, as kept in the answer-checker history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub problem: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

/// What a submit did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub record: AttemptRecord,
    /// `true` once the last problem of the round was answered.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerState {
    Active,
    Complete,
}

/// An in-progress math checker round.
#[derive(Debug, Clone)]
pub struct MathCheckerRound {
    operator: Operator,
    current: MathProblem,
    index: u32,
    total_count: u32,
    state: CheckerState,
}

impl MathCheckerRound {
    /// Start a round of `total_count` problems and generate the first one.
    pub fn start<R: Rng + ?Sized>(
        operator: Operator,
        total_count: u32,
        rng: &mut R,
    ) -> Result<Self, DatamonError> {
        if !(1..=MAX_ROUND_SIZE).contains(&total_count) {
            return Err(DatamonError::InvalidRoundSize {
                requested: total_count,
                max: MAX_ROUND_SIZE,
            });
        }
        tracing::debug!(%operator, total_count, "math round started");
        Ok(Self {
            operator,
            current: generator::generate(operator, rng),
            index: 0,
            total_count,
            state: CheckerState::Active,
        })
    }

    /// Check `answer` against the current problem and advance.
    ///
    /// The attempt is appended to `ledger`, scoring one point when correct.
    /// Rejected without side effects if the round is complete or the answer
    /// has the wrong shape for the problem.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        answer: Answer,
        rng: &mut R,
        ledger: &mut GameLedger<AttemptRecord>,
    ) -> Result<CheckOutcome, DatamonError> {
        if self.state == CheckerState::Complete {
            return Err(DatamonError::RoundOver);
        }
        if !self.current.expected.same_shape(&answer) {
            return Err(DatamonError::AnswerShape {
                expected: self.current.expected.shape(),
            });
        }

        let correct = self.current.is_correct(&answer);
        let record = AttemptRecord {
            problem: self.current.text(),
            user_answer: answer.to_string(),
            correct_answer: self.current.expected.to_string(),
            correct,
        };
        ledger.record(record.clone(), u32::from(correct));

        self.index += 1;
        if self.index < self.total_count {
            self.current = generator::generate(self.operator, rng);
        } else {
            self.state = CheckerState::Complete;
            tracing::info!(total = self.total_count, "math round complete");
        }

        Ok(CheckOutcome {
            record,
            complete: self.state == CheckerState::Complete,
        })
    }

    /// The problem awaiting an answer, or `None` once the round is complete.
    pub fn current_problem(&self) -> Option<&MathProblem> {
        match self.state {
            CheckerState::Active => Some(&self.current),
            CheckerState::Complete => None,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Number of problems answered so far.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    pub fn state(&self) -> CheckerState {
        self.state
    }
}
