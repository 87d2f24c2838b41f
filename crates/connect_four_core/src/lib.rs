// Core Connect Four game logic modules
pub mod board;
pub mod error;
pub mod player;
pub mod position;

// Re-export main types for convenience
pub use board::{Board, BoardKey, GameOutcome, DEFAULT_COLS, DEFAULT_ROWS};
pub use error::{BoardError, MoveError};
pub use player::{Cell, Player};
pub use position::{Direction, Position, CONNECT};
