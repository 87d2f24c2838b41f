use std::path::PathBuf;

use connect_four_core::BoardError;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("games_per_pairing must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: games_per_pairing must be > 0"
        );

        let err = ConfigError::from(BoardError::InvalidDimensions { rows: 0, cols: 7 });
        assert_eq!(
            err.to_string(),
            "invalid board: board dimensions must be at least 1x1 (got 0x7)"
        );
    }
}
