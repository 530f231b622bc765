//! Memory-bank quizzes.
//!
//! A quiz snapshots one student's problems from the store when it starts,
//! so edits made by a parent mid-quiz do not change the questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatamonError;
use crate::ledger::GameLedger;
use crate::model::{normalize_student_name, MemoryBankEntry};
use crate::store::ProblemStore;

/// A finished quiz, as kept in the memory-bank history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub timestamp: DateTime<Utc>,
    pub student: String,
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFeedback {
    pub correct: bool,
    /// The recorded answer, for showing after a miss.
    pub expected: String,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryQuiz {
    student: String,
    problems: Vec<MemoryBankEntry>,
    index: usize,
    score: u32,
    state: QuizState,
}

impl Default for MemoryQuiz {
    fn default() -> Self {
        Self {
            student: String::new(),
            problems: Vec::new(),
            index: 0,
            score: 0,
            state: QuizState::NotStarted,
        }
    }
}

impl MemoryQuiz {
    /// Start (or restart) a quiz from the student's problems in `store`.
    ///
    /// A student without problems still gets a started quiz; it simply has
    /// nothing to answer.
    pub fn start(&mut self, student: &str, store: &ProblemStore) -> Result<(), DatamonError> {
        let student = normalize_student_name(student);
        if student.is_empty() {
            return Err(DatamonError::EmptyField("student name"));
        }
        let problems = store.problems_for(&student);
        tracing::debug!(student = %student, count = problems.len(), "quiz started");
        *self = Self {
            student,
            problems,
            index: 0,
            score: 0,
            state: QuizState::InProgress,
        };
        Ok(())
    }

    /// Answer the current question and move to the next.
    ///
    /// Finishing the last question appends a [`QuizResult`] to `ledger`.
    pub fn submit(
        &mut self,
        answer: &str,
        ledger: &mut GameLedger<QuizResult>,
    ) -> Result<QuizFeedback, DatamonError> {
        let entry = match self.state {
            QuizState::NotStarted => return Err(DatamonError::NoActiveRound("quiz")),
            QuizState::Finished => return Err(DatamonError::RoundOver),
            QuizState::InProgress => match self.problems.get(self.index) {
                Some(entry) => entry,
                None => return Err(DatamonError::RoundOver),
            },
        };

        let correct = entry.accepts(answer);
        let expected = entry.answer.clone();
        if correct {
            self.score += 1;
        }
        self.index += 1;

        if self.index == self.problems.len() {
            self.state = QuizState::Finished;
            let total = self.problems.len() as u32;
            tracing::info!(student = %self.student, score = self.score, total, "quiz finished");
            ledger.record(
                QuizResult {
                    timestamp: Utc::now(),
                    student: self.student.clone(),
                    score: self.score,
                    total,
                },
                self.score,
            );
        }

        Ok(QuizFeedback {
            correct,
            expected,
            finished: self.state == QuizState::Finished,
        })
    }

    /// Drop the quiz and go back to [`QuizState::NotStarted`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The question awaiting an answer.
    pub fn current_problem(&self) -> Option<&MemoryBankEntry> {
        match self.state {
            QuizState::InProgress => self.problems.get(self.index),
            _ => None,
        }
    }

    /// `true` for a started quiz whose student had no problems.
    pub fn is_empty(&self) -> bool {
        self.state != QuizState::NotStarted && self.problems.is_empty()
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    /// Number of questions answered so far.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
