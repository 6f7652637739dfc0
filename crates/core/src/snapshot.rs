//! Snapshot module - owned, versioned board copies for the presentation layer

use serde::Serialize;

use crate::board::Board;

/// Owned copy of the board handed to the presentation layer.
///
/// `version` increases whenever the visible grid changed, so a consumer can
/// compare versions instead of cells to decide whether to redraw. A command
/// that was rejected hands back the previous version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    rows: Vec<Vec<bool>>,
    version: u64,
}

impl BoardSnapshot {
    pub fn new(rows: Vec<Vec<bool>>, version: u64) -> Self {
        Self { rows, version }
    }

    pub fn from_board(board: &Board, version: u64) -> Self {
        Self::new(board.rows(), version)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<bool>> {
        self.rows
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at column `x`, row `y`; false when out of range
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&filled| filled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_detached_from_board() {
        let mut board = Board::new(2, 2);
        board.set(0, 1, true);
        let snap = BoardSnapshot::from_board(&board, 4);

        board.clear();
        assert!(snap.is_filled(0, 1));
        assert!(!snap.is_filled(5, 5));
        assert_eq!((snap.width(), snap.height()), (2, 2));
        assert_eq!(snap.occupied_count(), 1);
    }

    #[test]
    fn test_snapshot_serializes_rows_and_version() {
        let snap = BoardSnapshot::new(vec![vec![true, false]], 9);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["rows"], serde_json::json!([[true, false]]));
        assert_eq!(json["version"], 9);
    }
}
