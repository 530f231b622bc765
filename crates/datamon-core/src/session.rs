//! Per-user session state.
//!
//! [`Session`] is the single entry point a front end talks to. It owns the
//! player ledger, the random source, the store handle, and whichever rounds
//! are in progress, and every user action is a method call on it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::checker::{CheckOutcome, MathCheckerRound};
use crate::error::DatamonError;
use crate::guesser::{GuessFeedback, GuessRound};
use crate::ledger::Player;
use crate::model::{Answer, Difficulty, Operator};
use crate::quiz::{MemoryQuiz, QuizFeedback};
use crate::store::{ProblemBank, ProblemStore};
use crate::summary::SessionSummary;

pub struct Session<R = StdRng> {
    player: Player,
    store: ProblemStore,
    rng: R,
    checker: Option<MathCheckerRound>,
    guesser: Option<GuessRound>,
    quiz: MemoryQuiz,
}

impl Session<StdRng> {
    /// A session with an entropy-seeded random source.
    pub fn new(store: ProblemStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// A session whose problems and secrets are reproducible from `seed`.
    pub fn seeded(store: ProblemStore, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(store: ProblemStore, rng: R) -> Self {
        Self {
            player: Player::default(),
            store,
            rng,
            checker: None,
            guesser: None,
            quiz: MemoryQuiz::default(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<(), DatamonError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatamonError::EmptyField("player name"));
        }
        self.player.name = name.to_string();
        Ok(())
    }

    pub fn store(&self) -> &ProblemStore {
        &self.store
    }

    // -- math checker -------------------------------------------------------

    /// Start a math round, replacing any round in progress.
    pub fn start_math_round(
        &mut self,
        operator: Operator,
        total_count: u32,
    ) -> Result<&MathCheckerRound, DatamonError> {
        let round = MathCheckerRound::start(operator, total_count, &mut self.rng)?;
        Ok(&*self.checker.insert(round))
    }

    /// Answer the current math problem. The round is dropped once complete.
    pub fn submit_math_answer(&mut self, answer: Answer) -> Result<CheckOutcome, DatamonError> {
        let round = self
            .checker
            .as_mut()
            .ok_or(DatamonError::NoActiveRound("math"))?;
        let outcome = round.submit(answer, &mut self.rng, &mut self.player.answer_checker)?;
        if outcome.complete {
            self.checker = None;
        }
        Ok(outcome)
    }

    pub fn math_round(&self) -> Option<&MathCheckerRound> {
        self.checker.as_ref()
    }

    // -- number guesser -----------------------------------------------------

    /// Start a guesser round, replacing any round in progress.
    pub fn start_guess_round(&mut self, difficulty: Difficulty) -> &GuessRound {
        let round = GuessRound::start(difficulty, &mut self.rng);
        &*self.guesser.insert(round)
    }

    /// Start a guesser round with a known secret.
    pub fn start_guess_round_with_secret(
        &mut self,
        difficulty: Difficulty,
        secret: i64,
    ) -> Result<&GuessRound, DatamonError> {
        let round = GuessRound::with_secret(difficulty, secret)?;
        Ok(&*self.guesser.insert(round))
    }

    /// Submit a guess. A finished round stays visible but rejects guesses.
    pub fn submit_guess(&mut self, guess: i64) -> Result<GuessFeedback, DatamonError> {
        let round = self
            .guesser
            .as_mut()
            .ok_or(DatamonError::NoActiveRound("number guesser"))?;
        round.submit(guess, &mut self.player.number_guesser)
    }

    pub fn guess_round(&self) -> Option<&GuessRound> {
        self.guesser.as_ref()
    }

    // -- memory bank --------------------------------------------------------

    pub fn add_problem(
        &self,
        student: &str,
        problem: &str,
        answer: &str,
    ) -> Result<usize, DatamonError> {
        self.store.add_problem(student, problem, answer)
    }

    pub fn clear_all(&self) -> Result<(), DatamonError> {
        Ok(self.store.clear_all()?)
    }

    pub fn problem_bank(&self) -> ProblemBank {
        self.store.list()
    }

    pub fn start_quiz(&mut self, student: &str) -> Result<&MemoryQuiz, DatamonError> {
        self.quiz.start(student, &self.store)?;
        Ok(&self.quiz)
    }

    pub fn submit_quiz_answer(&mut self, answer: &str) -> Result<QuizFeedback, DatamonError> {
        self.quiz.submit(answer, &mut self.player.memory_bank)
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
    }

    pub fn quiz(&self) -> &MemoryQuiz {
        &self.quiz
    }

    // -- summary ------------------------------------------------------------

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_player(&self.player)
    }
}
