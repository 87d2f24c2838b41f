use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, MoveError};
use crate::player::{Cell, Player};
use crate::position::{Direction, Position, CONNECT};

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Result of a game as read off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Winner(Player),
    Draw,
    InProgress,
}

/// Exact, packed encoding of a grid (two bits per cell), used to key the
/// transposition cache. Two keys are equal iff the grids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey {
    rows: usize,
    cols: usize,
    packed: Box<[u8]>,
}

/// A Connect Four grid. Row 0 is the top, row `rows - 1` the bottom.
///
/// Tokens always rest on the bottom row or on another token: every mutation
/// goes through `drop_token` / `undo_last_in_column`, which keep each column
/// contiguous from the bottom up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // row-major
}

impl Board {
    /// Empty 6x7 board.
    pub fn new() -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLS)
    }

    pub fn with_size(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self::empty(rows, cols))
    }

    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Builds a position from text rows, top row first: `.` is empty, `R` red
    /// and `Y` yellow. Positions with floating tokens are rejected.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let cols = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut board = Self::with_size(rows.len(), cols)?;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(BoardError::RaggedRow { row, expected: cols, found });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(BoardError::UnknownCell { row, col, symbol })?;
                let idx = board.index(row, col);
                board.cells[idx] = cell;
            }
        }

        // Gravity: nothing may sit above an empty cell
        for col in 0..board.cols {
            for row in 0..board.rows - 1 {
                if !board.get(row, col).is_empty() && board.get(row + 1, col).is_empty() {
                    return Err(BoardError::FloatingToken { row, col });
                }
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Panics if `row` or `col` is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) is off the board");
        self.cells[self.index(row, col)]
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.get(pos.row, pos.col)
    }

    /// Row-major snapshot of the grid, top row first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.cols || !self.get(0, col).is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    pub fn token_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Drops `player`'s token into `column`, returning the row it landed on.
    pub fn drop_token(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        if column >= self.cols {
            return Err(MoveError::InvalidColumn { column, cols: self.cols });
        }
        if self.is_column_full(column) {
            return Err(MoveError::ColumnFull(column));
        }

        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
            .ok_or(MoveError::ColumnFull(column))?;
        let idx = self.index(row, column);
        self.cells[idx] = player.to_cell();
        Ok(row)
    }

    /// Boolean form of `drop_token`: false when the column is out of range
    /// or full, and the board is left untouched.
    pub fn insert_token(&mut self, column: usize, player: Player) -> bool {
        self.drop_token(column, player).is_ok()
    }

    /// Clears the topmost token of `column` and returns its owner. Returns
    /// `None` without touching the board if the column is out of range or
    /// empty.
    pub fn undo_last_in_column(&mut self, column: usize) -> Option<Player> {
        if column >= self.cols {
            log::warn!("undo on out-of-range column {column}");
            return None;
        }

        let row = (0..self.rows).find(|&row| !self.get(row, column).is_empty());
        match row {
            Some(row) => {
                let idx = self.index(row, column);
                let removed = self.cells[idx].player();
                self.cells[idx] = Cell::Empty;
                removed
            }
            None => {
                log::warn!("undo on empty column {column}");
                None
            }
        }
    }

    /// Columns that can still take a token, ascending.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    pub fn window(&self, start: Position, direction: Direction) -> [Cell; CONNECT] {
        let (dr, dc) = direction.delta();
        std::array::from_fn(|i| {
            let row = (start.row as isize + dr * i as isize) as usize;
            let col = (start.col as isize + dc * i as isize) as usize;
            self.get(row, col)
        })
    }

    /// Every horizontal, vertical and diagonal run of `CONNECT` cells.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; CONNECT]> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| {
            direction
                .window_starts(self.rows, self.cols)
                .map(move |start| self.window(start, direction))
        })
    }

    /// The player owning a complete run, if any. All four directions are
    /// scanned.
    pub fn check_winner(&self) -> Option<Player> {
        self.windows().find_map(|window| {
            let owner = window[0].player()?;
            window.iter().all(|&c| c == window[0]).then_some(owner)
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.check_winner().is_some() || self.is_full()
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.check_winner() {
            Some(player) => GameOutcome::Winner(player),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// Canonical key of the full grid contents.
    pub fn serialize(&self) -> BoardKey {
        let mut packed = vec![0u8; self.cells.len().div_ceil(4)];
        for (i, cell) in self.cells.iter().enumerate() {
            packed[i / 4] |= cell.code() << ((i % 4) * 2);
        }
        BoardKey {
            rows: self.rows,
            cols: self.cols,
            packed: packed.into_boxed_slice(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;

    fn assert_no_floating_tokens(board: &Board) {
        for col in 0..board.cols() {
            for row in 0..board.rows() - 1 {
                assert!(
                    board.get(row, col).is_empty() || !board.get(row + 1, col).is_empty(),
                    "token floating at ({row}, {col})\n{board}"
                );
            }
        }
    }

    fn window_owners(board: &Board) -> BTreeSet<Player> {
        board
            .windows()
            .filter_map(|window| {
                let owner = window[0].player()?;
                window.iter().all(|&c| c == window[0]).then_some(owner)
            })
            .collect()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Board::with_size(0, 7),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 7 })
        );
        assert!(Board::with_size(1, 1).is_ok());
    }

    #[test]
    fn test_drop_token_stacks_from_bottom() {
        let mut board = Board::new();
        assert_eq!(board.drop_token(3, Player::Red), Ok(5));
        assert_eq!(board.drop_token(3, Player::Yellow), Ok(4));
        assert_eq!(board.get(5, 3), Cell::Red);
        assert_eq!(board.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_insert_token_rejects_bad_columns() {
        let mut board = Board::new();
        assert!(!board.insert_token(7, Player::Red));
        assert!(!board.insert_token(usize::MAX, Player::Red));

        for _ in 0..6 {
            assert!(board.insert_token(0, Player::Red));
        }
        let before = board.clone();
        assert!(!board.insert_token(0, Player::Yellow));
        assert_eq!(board, before);
        assert_eq!(board.drop_token(0, Player::Yellow), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_insert_then_undo_restores_grid() {
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            "...Y...",
            "..RR...",
            "Y.RYY..",
        ])
        .unwrap();

        for col in 0..board.cols() {
            for player in [Player::Red, Player::Yellow] {
                let before = board.clone();
                assert!(board.insert_token(col, player));
                assert_eq!(board.undo_last_in_column(col), Some(player));
                assert_eq!(board, before);
                assert_eq!(board.serialize(), before.serialize());
            }
        }
    }

    #[test]
    fn test_undo_guards_empty_and_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.undo_last_in_column(2), None);
        assert_eq!(board.undo_last_in_column(42), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_legal_moves_ascending_and_empty_when_full() {
        let mut board = Board::new();
        board.insert_token(1, Player::Red);
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);

        // Column-by-column fill in a pattern that never connects four
        for col in 0..7 {
            for row in 0..6 {
                let player = if (row / 2 + col) % 2 == 0 { Player::Red } else { Player::Yellow };
                board.insert_token(col, player);
            }
        }
        assert!(board.legal_moves().is_empty());
        assert!(board.is_full());
        assert!(board.is_terminal());
    }

    #[test]
    fn test_horizontal_win() {
        let board = Board::from_rows(&[".......", ".......", "RRRR..."]).unwrap();
        assert_eq!(board.check_winner(), Some(Player::Red));
    }

    #[test]
    fn test_vertical_win() {
        let board = Board::from_rows(&[
            "...Y...",
            "...Y...",
            "...Y...",
            "..RY...",
            "..RR...",
        ])
        .unwrap();
        assert_eq!(board.check_winner(), Some(Player::Yellow));
        assert_eq!(board.outcome(), GameOutcome::Winner(Player::Yellow));
    }

    #[test]
    fn test_diagonal_wins() {
        let up = Board::from_rows(&[
            "...R...",
            "..RY...",
            ".RYY...",
            "RYYR...",
        ])
        .unwrap();
        assert_eq!(up.check_winner(), Some(Player::Red));

        let down = Board::from_rows(&[
            "Y......",
            "RY.....",
            "RRY....",
            "YRRY...",
        ])
        .unwrap();
        assert_eq!(down.check_winner(), Some(Player::Yellow));
    }

    #[test]
    fn test_three_is_not_a_win() {
        let board = Board::from_rows(&["......", "RRR.YY"]).unwrap();
        assert_eq!(board.check_winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_draw_outcome() {
        let board = Board::from_rows(&[
            "RRYYRRY",
            "YYRRYYR",
            "RRYYRRY",
            "YYRRYYR",
            "RRYYRRY",
            "YYRRYYR",
        ])
        .unwrap();
        assert_eq!(board.check_winner(), None);
        assert_eq!(board.outcome(), GameOutcome::Draw);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert_eq!(
            Board::from_rows(&["R..", "..."]),
            Err(BoardError::FloatingToken { row: 0, col: 0 })
        );
        assert_eq!(
            Board::from_rows(&["...", ".."]),
            Err(BoardError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            Board::from_rows(&["..x"]),
            Err(BoardError::UnknownCell { row: 0, col: 2, symbol: 'x' })
        );
    }

    #[test]
    fn test_serialize_distinguishes_grids() {
        let mut a = Board::new();
        let mut b = Board::new();
        assert_eq!(a.serialize(), b.serialize());

        a.insert_token(0, Player::Red);
        b.insert_token(0, Player::Yellow);
        assert_ne!(a.serialize(), b.serialize());

        b.undo_last_in_column(0);
        b.insert_token(1, Player::Red);
        assert_ne!(a.serialize(), b.serialize());

        // Same contents, different shape
        let wide = Board::with_size(1, 4).unwrap();
        let tall = Board::with_size(4, 1).unwrap();
        assert_ne!(wide.serialize(), tall.serialize());
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["...", "RY."]).unwrap();
        assert_eq!(board.to_string(), ". . .\nR Y .\n0 1 2");
    }

    #[test]
    fn test_random_play_never_yields_two_winners() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new();
            let mut player = Player::Red;

            while !board.is_terminal() {
                let column = *board.legal_moves().choose(&mut rng).unwrap();

                // Insert, take back, and replay: gravity holds at every step
                let before = board.clone();
                assert!(board.insert_token(column, player));
                assert_no_floating_tokens(&board);
                assert_eq!(board.undo_last_in_column(column), Some(player));
                assert_no_floating_tokens(&board);
                assert_eq!(board, before);
                assert!(board.insert_token(column, player));

                let owners = window_owners(&board);
                assert!(owners.len() <= 1, "seed {seed}: {owners:?}\n{board}");
                assert_eq!(board.check_winner(), owners.first().copied());
                player = player.other();
            }
            assert_ne!(board.outcome(), GameOutcome::InProgress);
        }
    }
}
