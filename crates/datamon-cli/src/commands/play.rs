//! The `datamon play` command: a line-oriented game shell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use rand::Rng;

use datamon_core::checker::MAX_ROUND_SIZE;
use datamon_core::guesser::GuessOutcome;
use datamon_core::model::{normalize_student_name, Answer, Difficulty, Operator};
use datamon_core::quiz::QuizState;
use datamon_core::store::ProblemStore;
use datamon_core::{DatamonError, Session};

use crate::commands::bank::NewProblem;
use crate::config::load_config_from;
use crate::render::{bank_table, summary_text};

pub fn execute(
    config_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
    seed: Option<u64>,
    player: Option<String>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(
        (1..=MAX_ROUND_SIZE).contains(&config.problems_per_round),
        "problems_per_round must be between 1 and {MAX_ROUND_SIZE}"
    );

    let store = ProblemStore::new(data_path.unwrap_or(config.data_path));
    let mut session = match seed.or(config.seed) {
        Some(seed) => Session::seeded(store, seed),
        None => Session::new(store),
    };
    let name = player.unwrap_or(config.player_name);
    session
        .set_player_name(&name)
        .context("invalid player name")?;

    let defaults = Defaults {
        problems_per_round: config.problems_per_round,
        difficulty: config.default_difficulty,
    };
    let stdout = io::stdout();
    let mut shell = Shell::new(session, defaults, stdout.lock());
    shell.run(io::stdin().lock())
}

/// Values used when a command leaves an argument out.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub problems_per_round: u32,
    pub difficulty: Difficulty,
}

/// One line of shell input, parsed as a command without a binary name.
#[derive(Debug, Parser)]
#[command(multicall = true, help_template = "{all-args}")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum ShellCommand {
    /// Set the player name
    Name {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Start a math round (operator: + - * /)
    Math {
        #[arg(allow_hyphen_values = true)]
        operator: Operator,
        /// Problems in the round
        count: Option<u32>,
    },
    /// Answer the current math problem; division takes a quotient and a remainder
    Answer {
        #[arg(allow_negative_numbers = true)]
        value: i64,
        #[arg(allow_negative_numbers = true)]
        remainder: Option<i64>,
    },
    /// Start a number guesser round (easy, normal, hard)
    GuessStart { difficulty: Option<Difficulty> },
    /// Guess the secret number
    Guess {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Start a memory-bank quiz
    Quiz {
        #[arg(required = true)]
        student: Vec<String>,
    },
    /// Answer the current quiz question
    Reply {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        answer: Vec<String>,
    },
    /// Abandon the current quiz
    QuizReset,
    /// Add a memory-bank problem
    Add(NewProblem),
    /// List memory-bank problems
    Bank,
    /// Delete all memory-bank problems
    Clear,
    /// Show the session summary
    Summary,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// Split a line shell-style and parse it; blank lines yield `None`.
fn parse_command(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words = shlex::split(line)
        .ok_or_else(|| clap::Error::raw(ErrorKind::InvalidValue, "unbalanced quotes\n"))?;
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

/// Renders session state and forwards commands to the session.
pub struct Shell<R, W> {
    session: Session<R>,
    defaults: Defaults,
    out: W,
}

impl<R: Rng, W: Write> Shell<R, W> {
    pub fn new(session: Session<R>, defaults: Defaults, out: W) -> Self {
        Self {
            session,
            defaults,
            out,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run<I: BufRead>(&mut self, input: I) -> Result<()> {
        writeln!(
            self.out,
            "datamon, hello {}! Type 'help' for commands.",
            self.session.player().name
        )?;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if !self.handle_line(&line)? {
                break;
            }
        }
        Ok(())
    }

    /// Handle one line. Returns `false` when the shell should exit.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        match parse_command(line) {
            Ok(None) => Ok(true),
            Ok(Some(ShellCommand::Quit)) => {
                writeln!(self.out, "Bye!")?;
                Ok(false)
            }
            Ok(Some(command)) => {
                if let Err(e) = self.dispatch(command) {
                    match e.downcast::<DatamonError>() {
                        Ok(rejected) => writeln!(self.out, "! {rejected}")?,
                        Err(other) => return Err(other),
                    }
                }
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                write!(self.out, "{e}")?;
                Ok(true)
            }
            Err(e) => {
                writeln!(self.out, "! {}", e.to_string().trim_end())?;
                Ok(true)
            }
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Name { name } => {
                self.session.set_player_name(&name.join(" "))?;
                writeln!(self.out, "Player name set to {}.", self.session.player().name)?;
            }
            ShellCommand::Math { operator, count } => {
                let count = count.unwrap_or(self.defaults.problems_per_round);
                self.session.start_math_round(operator, count)?;
                writeln!(self.out, "Math round: {count} problem(s) of {operator}.")?;
                self.show_math_problem()?;
            }
            ShellCommand::Answer { value, remainder } => {
                let answer = match remainder {
                    Some(remainder) => Answer::Division {
                        quotient: value,
                        remainder,
                    },
                    None => Answer::Value(value),
                };
                let outcome = self.session.submit_math_answer(answer)?;
                if outcome.record.correct {
                    writeln!(self.out, "Correct!")?;
                } else {
                    writeln!(
                        self.out,
                        "Incorrect. {} = {}",
                        outcome.record.problem, outcome.record.correct_answer
                    )?;
                }
                if outcome.complete {
                    let ledger = &self.session.player().answer_checker;
                    writeln!(
                        self.out,
                        "Round complete! Score: {} | Attempts: {}",
                        ledger.score(),
                        ledger.len()
                    )?;
                } else {
                    self.show_math_problem()?;
                }
            }
            ShellCommand::GuessStart { difficulty } => {
                let difficulty = difficulty.unwrap_or(self.defaults.difficulty);
                let round = self.session.start_guess_round(difficulty);
                let range = round.range();
                writeln!(
                    self.out,
                    "{difficulty}: guess the number between {} and {}. You have {} tries.",
                    range.lo,
                    range.hi,
                    round.tries_total()
                )?;
            }
            ShellCommand::Guess { value } => {
                let feedback = self.session.submit_guess(value)?;
                match feedback.outcome {
                    GuessOutcome::Playing => writeln!(
                        self.out,
                        "Nope, try {}. {} tries left.",
                        feedback.hint, feedback.tries_left
                    )?,
                    GuessOutcome::Won { points } => {
                        writeln!(self.out, "Correct! +{points} pts")?;
                    }
                    GuessOutcome::Exhausted { secret } => writeln!(
                        self.out,
                        "Nope, try {}.\nOut of tries! The number was {secret}.",
                        feedback.hint
                    )?,
                }
                if feedback.outcome != GuessOutcome::Playing {
                    let ledger = &self.session.player().number_guesser;
                    writeln!(
                        self.out,
                        "Score: {} | Rounds: {}",
                        ledger.score(),
                        ledger.len()
                    )?;
                }
            }
            ShellCommand::Quiz { student } => {
                let quiz = self.session.start_quiz(&student.join(" "))?;
                if quiz.is_empty() {
                    writeln!(
                        self.out,
                        "No problems found for {}. Ask a parent to add some.",
                        quiz.student()
                    )?;
                } else {
                    writeln!(
                        self.out,
                        "Quiz for {}: {} question(s).",
                        quiz.student(),
                        quiz.len()
                    )?;
                    self.show_quiz_question()?;
                }
            }
            ShellCommand::Reply { answer } => {
                let feedback = self.session.submit_quiz_answer(&answer.join(" "))?;
                if feedback.correct {
                    writeln!(self.out, "Correct!")?;
                } else {
                    writeln!(self.out, "Incorrect. The answer was {}.", feedback.expected)?;
                }
                if feedback.finished {
                    let quiz = self.session.quiz();
                    writeln!(self.out, "Finished! Score: {} / {}", quiz.score(), quiz.len())?;
                } else {
                    self.show_quiz_question()?;
                }
            }
            ShellCommand::QuizReset => {
                self.session.reset_quiz();
                writeln!(self.out, "Quiz reset.")?;
            }
            ShellCommand::Add(entry) => {
                let count =
                    self.session
                        .add_problem(&entry.student, &entry.problem, &entry.answer)?;
                writeln!(
                    self.out,
                    "Added for {} ({count} problem(s)).",
                    normalize_student_name(&entry.student)
                )?;
            }
            ShellCommand::Bank => match bank_table(&self.session.problem_bank()) {
                Some(table) => writeln!(self.out, "{table}")?,
                None => writeln!(self.out, "No data yet.")?,
            },
            ShellCommand::Clear => {
                self.session.clear_all()?;
                writeln!(self.out, "All data cleared.")?;
            }
            ShellCommand::Summary => {
                write!(self.out, "{}", summary_text(&self.session.summary()))?;
            }
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn show_math_problem(&mut self) -> Result<()> {
        let Some(round) = self.session.math_round() else {
            return Ok(());
        };
        let Some(problem) = round.current_problem() else {
            return Ok(());
        };
        let hint = match problem.operator {
            Operator::DivRem => " (answer <quotient> <remainder>)",
            _ => "",
        };
        writeln!(
            self.out,
            "Problem {} of {}: {} = ?{hint}",
            round.index() + 1,
            round.total_count(),
            problem.text()
        )?;
        Ok(())
    }

    fn show_quiz_question(&mut self) -> Result<()> {
        let quiz = self.session.quiz();
        if quiz.state() != QuizState::InProgress {
            return Ok(());
        }
        if let Some(entry) = quiz.current_problem() {
            writeln!(
                self.out,
                "Question {} of {}: {}",
                quiz.index() + 1,
                quiz.len(),
                entry.problem
            )?;
        }
        Ok(())
    }
}
