//! The `datamon init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("datamon.toml").exists() {
        println!("datamon.toml already exists, skipping.");
    } else {
        std::fs::write("datamon.toml", SAMPLE_CONFIG)?;
        println!("Created datamon.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit datamon.toml to set the player name and data file");
    println!("  2. Add problems: datamon bank add --student Sam --problem \"7 + 5\" --answer 12");
    println!("  3. Run: datamon play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# datamon configuration

# Name shown in the session summary
player_name = "Player"

# JSON file holding memory-bank problems per student
# (DATAMON_DATA_PATH overrides this)
data_path = "Data.txt"

# Problems in a math round when `math` is given no count (1-50)
problems_per_round = 5

# Number guesser difficulty when `guess-start` is given none: easy, normal, hard
default_difficulty = "easy"

# Uncomment for reproducible problems and secrets
# seed = 42
"#;
