//! Front-end configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use datamon_core::model::Difficulty;

/// Environment variable that overrides `data_path`.
pub const DATA_PATH_ENV: &str = "DATAMON_DATA_PATH";

/// Top-level datamon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatamonConfig {
    /// Name shown in the session summary.
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Memory-bank store file.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Problems per math round when `math` is given no count.
    #[serde(default = "default_problems_per_round")]
    pub problems_per_round: u32,
    /// Difficulty used when `guess-start` is given none.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
    /// Fixed seed for reproducible play.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_player_name() -> String {
    datamon_core::ledger::DEFAULT_PLAYER_NAME.to_string()
}
fn default_data_path() -> PathBuf {
    PathBuf::from(datamon_core::store::DEFAULT_DATA_PATH)
}
fn default_problems_per_round() -> u32 {
    5
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

impl Default for DatamonConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            data_path: default_data_path(),
            problems_per_round: default_problems_per_round(),
            default_difficulty: default_difficulty(),
            seed: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `datamon.toml` in the current directory
/// 2. `~/.config/datamon/config.toml`
///
/// `DATAMON_DATA_PATH` overrides the store location.
pub fn load_config_from(path: Option<&Path>) -> Result<DatamonConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("datamon.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<DatamonConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => DatamonConfig::default(),
    };

    if let Ok(data_path) = std::env::var(DATA_PATH_ENV) {
        if !data_path.trim().is_empty() {
            config.data_path = PathBuf::from(data_path);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("datamon"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DatamonConfig::default();
        assert_eq!(config.player_name, "Player");
        assert_eq!(config.data_path, PathBuf::from("Data.txt"));
        assert_eq!(config.problems_per_round, 5);
        assert_eq!(config.default_difficulty, Difficulty::Easy);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
player_name = "Ada"
default_difficulty = "Hard"
seed = 7
"#;
        let config: DatamonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player_name, "Ada");
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.problems_per_round, 5);
    }

    #[test]
    fn difficulty_accepts_lowercase() {
        for (raw, expected) in [
            ("easy", Difficulty::Easy),
            ("normal", Difficulty::Normal),
            ("Normal", Difficulty::Normal),
            ("hard", Difficulty::Hard),
        ] {
            let config: DatamonConfig =
                toml::from_str(&format!("default_difficulty = \"{raw}\"")).unwrap();
            assert_eq!(config.default_difficulty, expected);
        }
        assert!(toml::from_str::<DatamonConfig>("default_difficulty = \"nightmare\"").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/datamon.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "problems_per_round = 12\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.problems_per_round, 12);
    }
}
