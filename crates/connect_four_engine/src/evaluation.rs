use connect_four_core::{Board, Cell, Player, CONNECT};

use crate::difficulty::Difficulty;

/// Evaluation score. Positive favours Yellow, negative favours Red.
pub type Score = f64;

// Terminal scores: a finished four-in-a-row short-circuits the heuristic
pub const WIN_SCORE: Score = 1000.0;

// Window pattern values, from the scoring player's side
const FOUR_VALUE: i32 = 100; // complete line
const OPEN_THREE_VALUE: i32 = 5; // three tokens and a gap
const OPEN_TWO_VALUE: i32 = 2; // two tokens and two gaps

/// Scores a single window of four cells for `player`.
///
/// Only the difficult tier looks at the opponent's tokens: a window where the
/// opponent needs one more token to connect is penalized.
pub fn evaluate_window(window: &[Cell; CONNECT], player: Player, difficulty: Difficulty) -> i32 {
    let own = player.to_cell();
    let opp = player.other().to_cell();
    let count = |cell: Cell| window.iter().filter(|&&c| c == cell).count();

    let (own_count, opp_count, empty_count) = (count(own), count(opp), count(Cell::Empty));

    let mut score = match (own_count, empty_count) {
        (4, _) => FOUR_VALUE,
        (3, 1) => OPEN_THREE_VALUE,
        (2, 2) => OPEN_TWO_VALUE,
        _ => 0,
    };

    if opp_count == 3 && empty_count == 1 {
        score -= difficulty.profile().opponent_three_penalty;
    }

    score
}

/// Heuristic part of the evaluation: center control plus every window
/// scored for Yellow minus the same for Red. No terminal shortcut and no
/// easy-tier halving.
pub fn heuristic_subtotal(board: &Board, difficulty: Difficulty) -> i32 {
    let center = board.cols() / 2;
    let center_count = (0..board.rows())
        .filter(|&row| board.get(row, center) == Cell::Yellow)
        .count() as i32;

    let mut score = center_count * difficulty.profile().center_weight;

    for window in board.windows() {
        score += evaluate_window(&window, Player::Yellow, difficulty);
        score -= evaluate_window(&window, Player::Red, difficulty);
    }

    score
}

/// Evaluates a position from Yellow's perspective.
///
/// A completed line returns `WIN_SCORE` (Yellow) or `-WIN_SCORE` (Red)
/// outright. Full boards without a winner are scored by the heuristic like
/// any other position.
pub fn evaluate_board(board: &Board, difficulty: Difficulty) -> Score {
    match board.check_winner() {
        Some(Player::Yellow) => WIN_SCORE,
        Some(Player::Red) => -WIN_SCORE,
        None => {
            let score = heuristic_subtotal(board, difficulty) as Score;
            if difficulty.profile().halve_score {
                score / 2.0
            } else {
                score
            }
        }
    }
}
