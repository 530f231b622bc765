//! Core data model types for datamon.
//!
//! Operators, answers, difficulty presets, and memory-bank entries shared
//! by the game state machines and the store.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arithmetic operation of a math-checker problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    /// Integer division answered as quotient and remainder.
    DivRem,
}

impl Operator {
    /// Symbol shown in problem text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::DivRem => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" => Ok(Operator::Add),
            "-" | "sub" => Ok(Operator::Sub),
            "*" | "x" | "×" | "mul" => Ok(Operator::Mul),
            "/" | "÷" | "div" | "divrem" | "div_rem" => Ok(Operator::DivRem),
            other => Err(format!("unknown operator: {other}")),
        }
    }
}

/// An answer to a math problem, either typed by the player or expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Value(i64),
    Division { quotient: i64, remainder: i64 },
}

impl Answer {
    /// Name of the answer shape, used in rejection messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Answer::Value(_) => "a single number",
            Answer::Division { .. } => "a quotient and a remainder",
        }
    }

    pub(crate) fn same_shape(&self, other: &Answer) -> bool {
        matches!(
            (self, other),
            (Answer::Value(_), Answer::Value(_))
                | (Answer::Division { .. }, Answer::Division { .. })
        )
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Value(v) => write!(f, "{v}"),
            Answer::Division {
                quotient,
                remainder,
            } => write!(f, "q={quotient}, r={remainder}"),
        }
    }
}

/// A generated arithmetic problem. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub operator: Operator,
    pub operand_a: i64,
    pub operand_b: i64,
    pub expected: Answer,
}

impl MathProblem {
    /// Problem text, e.g. `"12 * 7"` or `"17 ÷ 5"`.
    pub fn text(&self) -> String {
        format!("{} {} {}", self.operand_a, self.operator, self.operand_b)
    }

    pub fn is_correct(&self, answer: &Answer) -> bool {
        self.expected == *answer
    }
}

/// Number-guesser difficulty.
///
/// Serialized in lowercase; the capitalized display names are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Normal", alias = "medium")]
    Normal,
    #[serde(alias = "Hard")]
    Hard,
}

/// Range and try limit that a difficulty stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub lo: i64,
    pub hi: i64,
    pub tries: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn preset(&self) -> Preset {
        match self {
            Difficulty::Easy => Preset {
                lo: 1,
                hi: 10,
                tries: 5,
            },
            Difficulty::Normal => Preset {
                lo: 1,
                hi: 50,
                tries: 7,
            },
            Difficulty::Hard => Preset {
                lo: 1,
                hi: 100,
                tries: 9,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A parent-authored question and its expected answer.
///
/// The store file is edited by hand, so numbers are read as their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBankEntry {
    #[serde(deserialize_with = "text_or_number")]
    pub problem: String,
    #[serde(deserialize_with = "text_or_number")]
    pub answer: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(x) => x.to_string(),
    })
}

impl MemoryBankEntry {
    /// Case-insensitive, whitespace-trimmed text comparison.
    ///
    /// `"Dog"` matches `"dog "`, but `"012"` does not match `"12"`.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

/// Normalize a student name: trim, uppercase the first letter, lowercase the rest.
pub fn normalize_student_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_display_and_parse() {
        assert_eq!(Operator::Mul.to_string(), "*");
        assert_eq!(Operator::DivRem.to_string(), "÷");
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("SUB".parse::<Operator>().unwrap(), Operator::Sub);
        assert_eq!("x".parse::<Operator>().unwrap(), Operator::Mul);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::DivRem);
        assert_eq!("/".parse::<Operator>().unwrap(), Operator::DivRem);
        assert!("%".parse::<Operator>().is_err());
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(
            Difficulty::Easy.preset(),
            Preset {
                lo: 1,
                hi: 10,
                tries: 5
            }
        );
        assert_eq!(Difficulty::Normal.preset().hi, 50);
        assert_eq!(Difficulty::Normal.preset().tries, 7);
        assert_eq!(Difficulty::Hard.preset().hi, 100);
        assert_eq!(Difficulty::Hard.preset().tries, 9);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn answer_text() {
        assert_eq!(Answer::Value(-3).to_string(), "-3");
        let div = Answer::Division {
            quotient: 3,
            remainder: 2,
        };
        assert_eq!(div.to_string(), "q=3, r=2");
        assert!(!div.same_shape(&Answer::Value(3)));
    }

    #[test]
    fn problem_text() {
        let p = MathProblem {
            operator: Operator::DivRem,
            operand_a: 17,
            operand_b: 5,
            expected: Answer::Division {
                quotient: 3,
                remainder: 2,
            },
        };
        assert_eq!(p.text(), "17 ÷ 5");
    }

    #[test]
    fn student_names_are_normalized() {
        assert_eq!(normalize_student_name("  alice "), "Alice");
        assert_eq!(normalize_student_name("BOB"), "Bob");
        assert_eq!(normalize_student_name("émile"), "Émile");
        assert_eq!(normalize_student_name("   "), "");
    }

    #[test]
    fn memory_answers_compare_as_text() {
        let entry = MemoryBankEntry {
            problem: "cat".into(),
            answer: "dog".into(),
        };
        assert!(entry.accepts("Dog"));
        assert!(entry.accepts("  DOG  "));
        assert!(!entry.accepts("dogs"));

        let numeric = MemoryBankEntry {
            problem: "7 + 5".into(),
            answer: "12".into(),
        };
        assert!(!numeric.accepts("012"));
    }

    #[test]
    fn difficulty_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Normal).unwrap(), "\"normal\"");
        for (raw, expected) in [
            ("\"easy\"", Difficulty::Easy),
            ("\"Easy\"", Difficulty::Easy),
            ("\"medium\"", Difficulty::Normal),
            ("\"Hard\"", Difficulty::Hard),
        ] {
            assert_eq!(serde_json::from_str::<Difficulty>(raw).unwrap(), expected);
        }
        assert!(serde_json::from_str::<Difficulty>("\"EASY\"").is_err());
    }

    #[test]
    fn bank_entries_accept_numbers() {
        let entry: MemoryBankEntry =
            serde_json::from_str(r#"{"problem": 144, "answer": 12}"#).unwrap();
        assert_eq!(entry.problem, "144");
        assert_eq!(entry.answer, "12");
        assert!(entry.accepts("12"));

        let entry: MemoryBankEntry =
            serde_json::from_str(r#"{"problem": "half of 5", "answer": 2.5}"#).unwrap();
        assert_eq!(entry.answer, "2.5");

        assert!(serde_json::from_str::<MemoryBankEntry>(r#"{"problem": "x", "answer": [1]}"#)
            .is_err());
    }
}
