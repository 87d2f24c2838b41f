/// Reasons a token cannot be dropped into a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised while building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be at least 1x1 (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell symbol '{symbol}' at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, symbol: char },

    #[error("token at row {row}, column {col} has an empty cell beneath it")]
    FloatingToken { row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn { column: 9, cols: 7 };
        assert_eq!(err.to_string(), "column 9 is out of range (board has 7 columns)");
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::FloatingToken { row: 2, col: 4 };
        assert_eq!(
            err.to_string(),
            "token at row 2, column 4 has an empty cell beneath it"
        );
    }
}
