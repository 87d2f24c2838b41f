// Depth-limited minimax with alpha-beta pruning over a single scratch board.
// Every move tried is undone before the call returns, so the caller gets its
// board back exactly as it handed it in.
use connect_four_core::{Board, BoardKey, Player};

use crate::difficulty::Difficulty;
use crate::evaluation::{evaluate_board, Score};
use crate::transposition::TranspositionCache;

// Full alpha-beta window used at the root
pub const ALPHA_INIT: Score = f64::NEG_INFINITY;
pub const BETA_INIT: Score = f64::INFINITY;

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,      // minimax calls
    pub cache_hits: u64, // calls answered from the cache
    pub leaves: u64,     // static evaluations
}

/// One search over a borrowed board and cache.
pub struct Searcher<'a> {
    board: &'a mut Board,
    cache: &'a mut TranspositionCache,
    difficulty: Difficulty,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(
        board: &'a mut Board,
        cache: &'a mut TranspositionCache,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            board,
            cache,
            difficulty,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Read access to the scratch board between searches.
    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Tries `column` for `player`, searches the reply tree to `depth`, and
    /// takes the move back. `None` if the column cannot take a token.
    pub fn score_move(&mut self, column: usize, player: Player, depth: u32) -> Option<Score> {
        if !self.board.insert_token(column, player) {
            return None;
        }
        // After `player` moves, the other side is to move
        let score = self.minimax(depth, ALPHA_INIT, BETA_INIT, !player.is_maximizing());
        self.board.undo_last_in_column(column);
        Some(score)
    }

    /// Scores the current position. Yellow moves when `maximizing`, Red
    /// otherwise.
    pub fn minimax(
        &mut self,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.stats.nodes += 1;

        // Reuse any result searched at least this deep
        let key = self.board.serialize();
        if let Some(score) = self.cache.probe(&key, depth) {
            self.stats.cache_hits += 1;
            return score;
        }

        if depth == 0 || self.board.is_terminal() {
            return self.evaluate_and_store(key, depth);
        }

        let moves = self.board.legal_moves();
        if moves.is_empty() {
            return self.evaluate_and_store(key, depth);
        }

        let (player, mut best) = if maximizing {
            (Player::Yellow, Score::NEG_INFINITY)
        } else {
            (Player::Red, Score::INFINITY)
        };

        for column in moves {
            if !self.board.insert_token(column, player) {
                continue;
            }
            let score = self.minimax(depth - 1, alpha, beta, !maximizing);
            self.board.undo_last_in_column(column);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        self.cache.store(key, best, depth);
        best
    }

    fn evaluate_and_store(&mut self, key: BoardKey, depth: u32) -> Score {
        self.stats.leaves += 1;
        let score = evaluate_board(&*self.board, self.difficulty);
        self.cache.store(key, score, depth);
        score
    }
}

/// Runs a minimax search on `board`, consulting and filling `cache`.
///
/// `board` is used as scratch space and is restored before returning.
pub fn minimax(
    board: &mut Board,
    cache: &mut TranspositionCache,
    depth: u32,
    alpha: Score,
    beta: Score,
    maximizing: bool,
    difficulty: Difficulty,
) -> Score {
    Searcher::new(board, cache, difficulty).minimax(depth, alpha, beta, maximizing)
}
