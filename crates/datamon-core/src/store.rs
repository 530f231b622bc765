//! JSON-backed memory-bank store.
//!
//! The file holds one JSON object mapping student name to a list of
//! `{ "problem", "answer" }` objects, pretty-printed with students in
//! insertion order. A missing, empty, or unreadable file reads as an empty
//! bank. There is no locking; concurrent writers can lose updates.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{DatamonError, StoreError};
use crate::model::{normalize_student_name, MemoryBankEntry};

/// Default location of the store file.
pub const DEFAULT_DATA_PATH: &str = "Data.txt";

/// Student name to their problems, in insertion order.
pub type ProblemBank = IndexMap<String, Vec<MemoryBankEntry>>;

/// Handle to a problem bank file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemStore {
    path: PathBuf,
}

impl Default for ProblemStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl ProblemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the bank, reporting why it could not be read.
    ///
    /// A missing or blank file is not an error and yields an empty bank.
    pub fn try_load(&self) -> Result<ProblemBank, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProblemBank::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(ProblemBank::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Read the bank, falling back to an empty one on any failure.
    pub fn load(&self) -> ProblemBank {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable problem store {}: {e}", self.path.display());
            ProblemBank::new()
        })
    }

    /// Overwrite the file with `bank`.
    pub fn save(&self, bank: &ProblemBank) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(bank)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, json).map_err(io_err)?;
        tracing::info!(
            students = bank.len(),
            "problem store written to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Append a problem to a student's list and save.
    ///
    /// The student name is normalized first. Blank fields are rejected
    /// before the file is touched. Returns how many problems the student
    /// now has.
    pub fn add_problem(
        &self,
        student: &str,
        problem: &str,
        answer: &str,
    ) -> Result<usize, DatamonError> {
        let student = normalize_student_name(student);
        let problem = problem.trim();
        let answer = answer.trim();
        if student.is_empty() {
            return Err(DatamonError::EmptyField("student name"));
        }
        if problem.is_empty() {
            return Err(DatamonError::EmptyField("problem"));
        }
        if answer.is_empty() {
            return Err(DatamonError::EmptyField("answer"));
        }

        let mut bank = self.load();
        let entries = bank.entry(student.clone()).or_default();
        entries.push(MemoryBankEntry {
            problem: problem.to_string(),
            answer: answer.to_string(),
        });
        let count = entries.len();
        self.save(&bank)?;
        tracing::info!(student = %student, count, "problem added");
        Ok(count)
    }

    /// Replace the bank with an empty one.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.save(&ProblemBank::new())?;
        tracing::info!("problem store cleared: {}", self.path.display());
        Ok(())
    }

    /// The whole bank, for the parent view.
    pub fn list(&self) -> ProblemBank {
        self.load()
    }

    /// A snapshot of one student's problems; empty if they have none.
    pub fn problems_for(&self, student: &str) -> Vec<MemoryBankEntry> {
        let student = normalize_student_name(student);
        self.load().shift_remove(&student).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProblemStore {
        ProblemStore::new(dir.path().join("Data.txt"))
    }

    fn entry(problem: &str, answer: &str) -> MemoryBankEntry {
        MemoryBankEntry {
            problem: problem.into(),
            answer: answer.into(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn blank_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.try_load(), Err(StoreError::Serialize(_))));
        assert!(store.load().is_empty());
    }

    #[test]
    fn hand_edited_numbers_keep_every_student() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"Sam":[{"problem":"7 + 5","answer":12}],"Lee":[{"problem":"cat","answer":"dog"}]}"#,
        )
        .unwrap();

        let bank = store.try_load().unwrap();
        assert_eq!(bank["Sam"], vec![entry("7 + 5", "12")]);

        store.add_problem("Kim", "sky", "blue").unwrap();
        let bank = store.load();
        let names: Vec<&String> = bank.keys().collect();
        assert_eq!(names, vec!["Sam", "Lee", "Kim"]);
        assert_eq!(bank["Lee"], vec![entry("cat", "dog")]);
        assert_eq!(bank["Sam"], vec![entry("7 + 5", "12")]);
    }

    #[test]
    fn save_then_load_roundtrip_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut bank = ProblemBank::new();
        bank.insert("Zoe".into(), vec![entry("2+2", "4")]);
        bank.insert("Adam".into(), vec![entry("cat", "dog"), entry("sky", "blue")]);

        store.save(&bank).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, bank);
        let names: Vec<&String> = loaded.keys().collect();
        assert_eq!(names, vec!["Zoe", "Adam"]);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"Zoe\": ["), "expected pretty JSON, got: {raw}");
    }

    #[test]
    fn save_into_missing_directory_creates_it() {
        let dir = TempDir::new().unwrap();
        let store = ProblemStore::new(dir.path().join("nested/bank.json"));
        store.save(&ProblemBank::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_reports_failure() {
        let dir = TempDir::new().unwrap();
        // The path is a directory, so writing it as a file must fail.
        let store = ProblemStore::new(dir.path());
        assert!(matches!(
            store.save(&ProblemBank::new()),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn add_problem_normalizes_and_appends() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.add_problem("  alice", "7 + 5", "12").unwrap(), 1);
        assert_eq!(store.add_problem("ALICE", "cat", "dog").unwrap(), 2);
        assert_eq!(store.add_problem("bob", "1+1", "2").unwrap(), 1);

        let bank = store.load();
        assert_eq!(bank.len(), 2);
        assert_eq!(
            bank["Alice"],
            vec![entry("7 + 5", "12"), entry("cat", "dog")]
        );
        assert_eq!(store.problems_for("alice ").len(), 2);
        assert!(store.problems_for("carol").is_empty());
    }

    #[test]
    fn add_problem_rejects_blank_fields_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.add_problem("  ", "2+2", "4"),
            Err(DatamonError::EmptyField("student name"))
        ));
        assert!(matches!(
            store.add_problem("Ann", "", "4"),
            Err(DatamonError::EmptyField("problem"))
        ));
        assert!(matches!(
            store.add_problem("Ann", "2+2", " "),
            Err(DatamonError::EmptyField("answer"))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_all_always_empties() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_problem("Ann", "2+2", "4").unwrap();
        store.clear_all().unwrap();
        assert!(store.load().is_empty());

        std::fs::write(store.path(), "garbage").unwrap();
        store.clear_all().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{}");
    }
}
