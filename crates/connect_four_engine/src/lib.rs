pub mod ai;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod search;
pub mod tournament;
pub mod transposition;

pub use ai::select_move;
pub use config::{GameConfig, TournamentConfig};
pub use difficulty::{Difficulty, DifficultyProfile, ParseDifficultyError};
pub use error::ConfigError;
pub use evaluation::{evaluate_board, evaluate_window, Score, WIN_SCORE};
pub use game::Game;
pub use search::{minimax, SearchStats, Searcher};
pub use tournament::{play_full_game, run_tournament, MatchReport, Record, TournamentResults};
pub use transposition::TranspositionCache;
