use connect_four_core::{Board, Player};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::Difficulty;
use crate::evaluation::Score;
use crate::search::Searcher;
use crate::transposition::TranspositionCache;

/// Picks a column for `player` at the given difficulty.
///
/// Legal columns are shuffled with `rng` so equally scored moves are not
/// always resolved the same way, then each is tried and searched
/// `depth - 1` further plies. Yellow keeps the highest score, Red the
/// lowest; ties go to whichever candidate was tried first. Returns `None`
/// when the board has no legal move.
pub fn select_move<R: Rng + ?Sized>(
    board: &mut Board,
    cache: &mut TranspositionCache,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let depth = difficulty.depth();
    let mut moves = board.legal_moves();
    if moves.is_empty() {
        log::warn!("{player} asked for a move on a board with no legal moves");
        return None;
    }
    moves.shuffle(rng);

    let mut searcher = Searcher::new(board, cache, difficulty);
    let mut best: Option<(usize, Score)> = None;

    for column in moves {
        let Some(score) = searcher.score_move(column, player, depth.saturating_sub(1)) else {
            continue;
        };
        log::trace!("{player} ({difficulty}) column {column}: {score}");

        let improves = match best {
            None => true,
            Some((_, best_score)) if player.is_maximizing() => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((column, score));
        }
    }

    let stats = searcher.stats();
    match best {
        Some((column, score)) => log::debug!(
            "{player} ({difficulty}, depth {depth}) plays column {column} scoring {score}; \
             {} nodes, {} cache hits",
            stats.nodes,
            stats.cache_hits
        ),
        None => log::warn!("{player} found no playable column"),
    }

    best.map(|(column, _)| column)
}
