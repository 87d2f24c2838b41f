/// Number of aligned tokens needed to win, and the length of every scored window.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize, // 0 is the top row
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `n` cells along `direction`, or `None` when that would leave a
    /// `rows` x `cols` grid.
    pub fn offset(self, direction: Direction, n: usize, rows: usize, cols: usize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row as isize + dr * n as isize;
        let col = self.col as isize + dc * n as isize;

        if row < 0 || col < 0 || row >= rows as isize || col >= cols as isize {
            return None;
        }
        Some(Self::new(row as usize, col as usize))
    }
}

/// The four line orientations a window can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,   // left to right
    Vertical,     // top to bottom
    DiagonalDown, // \ top-left to bottom-right
    DiagonalUp,   // / bottom-left to top-right
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row step, column step)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// Every position from which a full window of `CONNECT` cells fits on a
    /// `rows` x `cols` grid, row-major.
    pub fn window_starts(self, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
            .filter(move |start| start.offset(self, CONNECT - 1, rows, cols).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_on_grid() {
        let pos = Position::new(5, 0);
        assert_eq!(pos.offset(Direction::DiagonalUp, 3, 6, 7), Some(Position::new(2, 3)));
        assert_eq!(pos.offset(Direction::Vertical, 1, 6, 7), None);
        assert_eq!(pos.offset(Direction::Horizontal, 7, 6, 7), None);
    }

    #[test]
    fn test_window_counts_on_standard_board() {
        let count = |d: Direction| d.window_starts(6, 7).count();
        assert_eq!(count(Direction::Horizontal), 24);
        assert_eq!(count(Direction::Vertical), 21);
        assert_eq!(count(Direction::DiagonalDown), 12);
        assert_eq!(count(Direction::DiagonalUp), 12);
    }

    #[test]
    fn test_no_windows_on_tiny_board() {
        for direction in Direction::ALL {
            assert_eq!(direction.window_starts(3, 3).count(), 0);
        }
        // A single row still has horizontal windows
        assert_eq!(Direction::Horizontal.window_starts(1, 5).count(), 2);
        assert_eq!(Direction::Vertical.window_starts(1, 5).count(), 0);
    }
}
