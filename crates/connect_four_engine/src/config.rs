use std::path::Path;

use connect_four_core::{Board, Player, DEFAULT_COLS, DEFAULT_ROWS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::ConfigError;

/// Session parameters: board size and each side's difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub red: Difficulty,
    pub yellow: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            red: Difficulty::Medium,
            yellow: Difficulty::Medium,
        }
    }
}

impl GameConfig {
    /// Standard 6x7 board with the given difficulties.
    pub fn new(red: Difficulty, yellow: Difficulty) -> Self {
        GameConfig {
            red,
            yellow,
            ..Self::default()
        }
    }

    pub fn difficulty(&self, player: Player) -> Difficulty {
        match player {
            Player::Red => self.red,
            Player::Yellow => self.yellow,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::with_size(self.rows, self.cols)?;
        Ok(())
    }
}

/// Parameters of a round-robin between difficulty tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub rows: usize,
    pub cols: usize,
    /// Games played for each ordered (red, yellow) pairing.
    pub games_per_pairing: usize,
    pub tiers: Vec<Difficulty>,
    /// Base seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            games_per_pairing: 5,
            tiers: Difficulty::AI_TIERS.to_vec(),
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: TournamentConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Tiers in first-seen order with duplicates removed.
    pub fn distinct_tiers(&self) -> Vec<Difficulty> {
        let mut tiers = Vec::with_capacity(self.tiers.len());
        for &tier in &self.tiers {
            if !tiers.contains(&tier) {
                tiers.push(tier);
            }
        }
        tiers
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::with_size(self.rows, self.cols)?;
        if self.games_per_pairing == 0 {
            return Err(ConfigError::Validation(
                "games_per_pairing must be > 0".into(),
            ));
        }
        if self.distinct_tiers().len() < 2 {
            return Err(ConfigError::Validation(
                "tiers must name at least two distinct difficulties".into(),
            ));
        }
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols), (6, 7));
        assert_eq!(config.difficulty(Player::Red), Difficulty::Medium);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_game_config_partial_json() {
        let json = r#"{"yellow": "difficult", "cols": 8}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.yellow, Difficulty::Difficult);
        assert_eq!(config.red, Difficulty::Medium);
        assert_eq!(config.cols, 8);
        assert_eq!(config.rows, 6);
    }

    #[test]
    fn test_game_config_rejects_zero_rows() {
        let config = GameConfig { rows: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Board(_))));
    }

    #[test]
    fn test_tournament_config_validation() {
        assert!(TournamentConfig::default().validate().is_ok());

        let no_games = TournamentConfig { games_per_pairing: 0, ..TournamentConfig::default() };
        assert!(matches!(no_games.validate(), Err(ConfigError::Validation(_))));

        let one_tier = TournamentConfig {
            tiers: vec![Difficulty::Easy, Difficulty::Easy],
            ..TournamentConfig::default()
        };
        assert!(matches!(one_tier.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_distinct_tiers_keeps_order() {
        let config = TournamentConfig {
            tiers: vec![Difficulty::Difficult, Difficulty::Easy, Difficulty::Difficult],
            ..TournamentConfig::default()
        };
        assert_eq!(config.distinct_tiers(), vec![Difficulty::Difficult, Difficulty::Easy]);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/connect_four.json");
        assert_eq!(GameConfig::load_or_default(path).unwrap(), GameConfig::default());
        assert!(matches!(GameConfig::load(path), Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let name = format!("connect_four_tournament_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let json = r#"{"games_per_pairing": 2, "tiers": ["easy", "medium"], "seed": 7}"#;
        std::fs::write(&path, json).unwrap();

        let config = TournamentConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.games_per_pairing, 2);
        assert_eq!(config.tiers, vec![Difficulty::Easy, Difficulty::Medium]);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rows, 6);
    }
}
