//! The `datamon bank` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use datamon_core::store::ProblemStore;

use crate::config::load_config_from;
use crate::render::bank_table;
use crate::BankAction;

/// A memory-bank problem typed by a parent.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct NewProblem {
    /// Student name
    #[arg(long)]
    pub student: String,

    /// Problem text (e.g. "7 + 5")
    #[arg(long)]
    pub problem: String,

    /// Expected answer (e.g. "12")
    #[arg(long, allow_hyphen_values = true)]
    pub answer: String,
}

pub fn execute(
    action: BankAction,
    config_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = ProblemStore::new(data_path.unwrap_or(config.data_path));

    match action {
        BankAction::Add(entry) => {
            let count = store
                .add_problem(&entry.student, &entry.problem, &entry.answer)
                .context("failed to add problem")?;
            let student = datamon_core::model::normalize_student_name(&entry.student);
            println!("Added for {student} ({count} problem(s)).");
        }
        BankAction::List => match bank_table(&store.list()) {
            Some(table) => println!("{table}"),
            None => println!("No data yet."),
        },
        BankAction::Clear => {
            store
                .clear_all()
                .with_context(|| format!("failed to clear {}", store.path().display()))?;
            println!("All data cleared.");
        }
    }

    Ok(())
}
