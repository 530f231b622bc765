//! Table rendering for the terminal.

use comfy_table::{Cell, Table};

use datamon_core::store::ProblemBank;
use datamon_core::summary::SessionSummary;

/// The parent view of the memory bank.
pub fn bank_table(bank: &ProblemBank) -> Option<Table> {
    if bank.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec!["Student", "Problem", "Answer"]);
    for (student, entries) in bank {
        for entry in entries {
            table.add_row(vec![
                Cell::new(student),
                Cell::new(&entry.problem),
                Cell::new(&entry.answer),
            ]);
        }
    }
    Some(table)
}

/// The session summary as text, one section per game.
pub fn summary_text(summary: &SessionSummary) -> String {
    let mut out = format!("Session summary for {}\n\n", summary.player_name);

    let checker = &summary.answer_checker;
    out.push_str(&format!(
        "Answer Checker: {} points, {} attempts\n",
        checker.score, checker.count
    ));
    if !checker.recent.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["", "Problem", "You", "Correct"]);
        for attempt in &checker.recent {
            table.add_row(vec![
                Cell::new(if attempt.correct { "OK" } else { "X" }),
                Cell::new(&attempt.problem),
                Cell::new(&attempt.user_answer),
                Cell::new(&attempt.correct_answer),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    let guesser = &summary.number_guesser;
    out.push_str(&format!(
        "\nNumber Guesser: {} points, {} rounds\n",
        guesser.score, guesser.count
    ));
    if !guesser.recent.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Result", "Difficulty", "Range", "Tries", "Points"]);
        for round in &guesser.recent {
            table.add_row(vec![
                Cell::new(if round.won { "WIN" } else { "LOSE" }),
                Cell::new(round.difficulty),
                Cell::new(format!("{}-{}", round.range.lo, round.range.hi)),
                Cell::new(round.attempts_used),
                Cell::new(format!("+{}", round.points)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    let bank = &summary.memory_bank;
    out.push_str(&format!(
        "\nMemory Bank: {} points, {} quizzes\n",
        bank.score, bank.count
    ));
    if !bank.recent.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Student", "Score"]);
        for quiz in &bank.recent {
            table.add_row(vec![
                Cell::new(&quiz.student),
                Cell::new(format!("{} / {}", quiz.score, quiz.total)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datamon_core::ledger::Player;
    use datamon_core::model::MemoryBankEntry;

    #[test]
    fn empty_bank_has_no_table() {
        assert!(bank_table(&ProblemBank::new()).is_none());
    }

    #[test]
    fn bank_table_lists_every_entry() {
        let mut bank = ProblemBank::new();
        bank.insert(
            "Sam".into(),
            vec![MemoryBankEntry {
                problem: "7 + 5".into(),
                answer: "12".into(),
            }],
        );
        let text = bank_table(&bank).unwrap().to_string();
        assert!(text.contains("Sam"));
        assert!(text.contains("7 + 5"));
        assert!(text.contains("12"));
    }

    #[test]
    fn summary_of_fresh_player() {
        let summary = SessionSummary::from_player(&Player::new("Ada"));
        let text = summary_text(&summary);
        assert!(text.contains("Session summary for Ada"));
        assert!(text.contains("Answer Checker: 0 points, 0 attempts"));
        assert!(text.contains("Number Guesser: 0 points, 0 rounds"));
        assert!(text.contains("Memory Bank: 0 points, 0 quizzes"));
    }
}
