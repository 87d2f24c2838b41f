use connect_four_core::{Board, GameOutcome, MoveError, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::select_move;
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::error::ConfigError;
use crate::transposition::TranspositionCache;

/// A game session: the board, both sides' difficulties, whose turn it is,
/// and the search state shared by every move request of the session.
///
/// The randomness source only breaks ties between equally scored moves;
/// seed it (`with_seed` / `with_rng`) for reproducible play.
pub struct Game<R = StdRng> {
    board: Board,
    red: Difficulty,
    yellow: Difficulty,
    turn: Player,
    cache: TranspositionCache,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Game {
            board: Board::new(),
            red: Difficulty::Medium,
            yellow: Difficulty::Medium,
            turn: Player::Red,
            cache: TranspositionCache::new(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Game {
            board: Board::with_size(config.rows, config.cols)?,
            red: config.red,
            yellow: config.yellow,
            turn: Player::Red,
            cache: TranspositionCache::new(),
            rng,
        })
    }

    /// Read-only view of the grid, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move. Red opens.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn difficulty(&self, player: Player) -> Difficulty {
        match player {
            Player::Red => self.red,
            Player::Yellow => self.yellow,
        }
    }

    /// Number of positions memoized so far in this session.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops a token for `player`. False (and no change) if the column is
    /// out of range or full. Does not touch the turn marker.
    pub fn insert_token(&mut self, column: usize, player: Player) -> bool {
        self.board.insert_token(column, player)
    }

    pub fn undo_last_in_column(&mut self, column: usize) -> Option<Player> {
        self.board.undo_last_in_column(column)
    }

    /// Plays `column` for the side to move and passes the turn.
    pub fn play_move(&mut self, column: usize) -> Result<usize, MoveError> {
        let row = self.board.drop_token(column, self.turn)?;
        self.turn = self.turn.other();
        Ok(row)
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.board.legal_moves()
    }

    pub fn check_winner(&self) -> Option<Player> {
        self.board.check_winner()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Column chosen by the AI for `player` at that player's difficulty, or
    /// `None` if no column is playable. The board is unchanged afterwards.
    pub fn best_move(&mut self, player: Player) -> Option<usize> {
        let difficulty = self.difficulty(player);
        select_move(&mut self.board, &mut self.cache, player, difficulty, &mut self.rng)
    }
}
