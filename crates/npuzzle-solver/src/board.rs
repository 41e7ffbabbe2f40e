//! Sliding-tile board representation.
//!
//! A [`Board`] is an immutable arrangement of the tiles `0..=8` on a 3x3
//! grid, with `0` standing for the blank. The tile array itself is the
//! canonical key: two boards are equal iff their arrangements are identical,
//! and the derived `Hash` makes boards usable directly as set members.
//!
//! Serde support accepts and produces the nested-array JSON form
//! `[[1,2,3],[4,0,5],[6,7,8]]` used by the CLI.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Side length of the board.
pub const SIDE: usize = 3;

/// Number of cells (and distinct tile values, blank included).
pub const CELLS: usize = SIDE * SIDE;

/// The solved arrangement: `1, 2, ..., 8, 0` in row-major order.
pub const GOAL: Board = Board {
    tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
};

/// Blank-swap offsets in expansion order: up, down, left, right.
///
/// The order is fixed so neighbor generation (and therefore tie-breaking
/// in the search) is deterministic.
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Why a grid was rejected as a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Input was not a SIDE x SIDE grid.
    WrongShape { rows: usize, cols: usize },
    /// A value outside `0..CELLS` appeared.
    ValueOutOfRange(u8),
    /// A value appeared more than once (some other value is missing).
    DuplicateValue(u8),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoardError::WrongShape { rows, cols } => write!(
                f,
                "expected a {SIDE}x{SIDE} grid, got {rows} row(s) with {cols} column(s)"
            ),
            BoardError::ValueOutOfRange(v) => {
                write!(f, "tile value {v} is outside 0..{CELLS}")
            }
            BoardError::DuplicateValue(v) => write!(f, "tile value {v} appears more than once"),
        }
    }
}

impl std::error::Error for BoardError {}

/// An immutable board configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    /// Row-major tile values; exactly a permutation of `0..CELLS`.
    tiles: [u8; CELLS],
}

impl Board {
    /// Validate a grid and build a board from it.
    ///
    /// The grid must contain every value in `0..CELLS` exactly once;
    /// anything else is rejected with a [`BoardError`], never repaired.
    pub fn from_grid(grid: [[u8; SIDE]; SIDE]) -> Result<Self, BoardError> {
        let mut tiles = [0u8; CELLS];
        let mut seen = [false; CELLS];

        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value as usize >= CELLS {
                    return Err(BoardError::ValueOutOfRange(value));
                }
                if seen[value as usize] {
                    return Err(BoardError::DuplicateValue(value));
                }
                seen[value as usize] = true;
                tiles[r * SIDE + c] = value;
            }
        }

        // All CELLS values distinct and in range, so none is missing.
        Ok(Board { tiles })
    }

    /// Tile value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIDE + col]
    }

    /// Whether this board is the solved arrangement.
    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Sum of Manhattan distances of every non-blank tile from its goal
    /// cell.
    ///
    /// Admissible (never overestimates the remaining move count) and
    /// consistent, which the A* optimality argument relies on.
    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0u32;
        for (cell, &value) in self.tiles.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let row = cell / SIDE;
            let col = cell % SIDE;
            let goal_row = (value as usize - 1) / SIDE;
            let goal_col = (value as usize - 1) % SIDE;
            distance += row.abs_diff(goal_row) as u32;
            distance += col.abs_diff(goal_col) as u32;
        }
        distance
    }

    /// Position of the blank as `(row, col)`.
    ///
    /// The blank is unique by the permutation invariant, so the first
    /// row-major match is the only one.
    pub fn blank_position(&self) -> (usize, usize) {
        let cell = self
            .tiles
            .iter()
            .position(|&v| v == 0)
            .unwrap_or_default();
        (cell / SIDE, cell % SIDE)
    }

    /// All boards reachable by one legal blank swap, in the fixed order
    /// up, down, left, right (out-of-bounds moves skipped).
    pub fn neighbors(&self) -> SmallVec<[Board; 4]> {
        let (row, col) = self.blank_position();
        let blank = row * SIDE + col;

        let mut out = SmallVec::new();
        for (dr, dc) in MOVES {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nr >= SIDE as isize || nc < 0 || nc >= SIDE as isize {
                continue;
            }
            out.push(self.swapped(blank, nr as usize * SIDE + nc as usize));
        }
        out
    }

    /// Whether the goal is reachable from this board.
    ///
    /// Classic inversion-parity test: on odd-sided boards the goal class
    /// is exactly the even-inversion permutations; on even-sided boards
    /// the blank row enters the invariant.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();
        if SIDE % 2 == 1 {
            inversions % 2 == 0
        } else {
            let (blank_row, _) = self.blank_position();
            (inversions + blank_row) % 2 == 1
        }
    }

    /// A uniformly random solvable board.
    pub fn scrambled<R: Rng>(rng: &mut R) -> Board {
        let mut tiles = GOAL.tiles;
        loop {
            tiles.shuffle(rng);
            let board = Board { tiles };
            if board.is_solvable() {
                return board;
            }
        }
    }

    fn count_inversions(&self) -> usize {
        let mut inversions = 0;
        for (i, &a) in self.tiles.iter().enumerate() {
            if a == 0 {
                continue;
            }
            inversions += self.tiles[i + 1..]
                .iter()
                .filter(|&&b| b != 0 && b < a)
                .count();
        }
        inversions
    }

    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut tiles = self.tiles;
        tiles.swap(a, b);
        Board { tiles }
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() != SIDE || rows.iter().any(|row| row.len() != SIDE) {
            let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
            return Err(BoardError::WrongShape {
                rows: rows.len(),
                cols,
            });
        }

        let mut grid = [[0u8; SIDE]; SIDE];
        for (r, row) in rows.iter().enumerate() {
            grid[r].copy_from_slice(row);
        }
        Board::from_grid(grid)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        (0..SIDE)
            .map(|r| board.tiles[r * SIDE..(r + 1) * SIDE].to_vec())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                write!(f, "{:2} ", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn board(grid: [[u8; SIDE]; SIDE]) -> Board {
        Board::from_grid(grid).unwrap()
    }

    #[test]
    fn test_from_grid_rejects_duplicates() {
        let result = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 8]]);
        assert_eq!(result, Err(BoardError::DuplicateValue(8)));
    }

    #[test]
    fn test_from_grid_rejects_out_of_range() {
        let result = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(result, Err(BoardError::ValueOutOfRange(9)));
    }

    #[test]
    fn test_try_from_rejects_wrong_shape() {
        let result = Board::try_from(vec![vec![1, 2, 3], vec![4, 0, 5]]);
        assert_eq!(result, Err(BoardError::WrongShape { rows: 2, cols: 3 }));

        let result = Board::try_from(vec![vec![1, 2], vec![3, 4], vec![5, 0]]);
        assert_eq!(result, Err(BoardError::WrongShape { rows: 3, cols: 2 }));
    }

    #[test]
    fn test_goal_recognition() {
        assert!(GOAL.is_goal());
        assert!(board([[1, 2, 3], [4, 5, 6], [7, 8, 0]]).is_goal());
        assert!(!board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).is_goal());
        assert!(!board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]).is_goal());
    }

    #[test]
    fn test_heuristic_zero_iff_goal() {
        assert_eq!(GOAL.manhattan_distance(), 0);

        // Any displaced tile contributes at least one.
        let one_off = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert!(one_off.manhattan_distance() > 0);
        assert!(!one_off.is_goal());
    }

    #[test]
    fn test_heuristic_values() {
        // Tile 8 one cell left of home, blank elsewhere.
        assert_eq!(
            board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).manhattan_distance(),
            1
        );
        // Demo start: 5 off by one, 6/7/8 shifted along the bottom.
        assert_eq!(
            board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).manhattan_distance(),
            6
        );
        // Fully reversed arrangement.
        assert_eq!(
            board([[8, 7, 6], [5, 4, 3], [2, 1, 0]]).manhattan_distance(),
            16
        );
    }

    #[test]
    fn test_blank_position() {
        assert_eq!(GOAL.blank_position(), (2, 2));
        assert_eq!(
            board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]).blank_position(),
            (0, 0)
        );
        assert_eq!(
            board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).blank_position(),
            (1, 1)
        );
    }

    #[test]
    fn test_neighbors_center_blank() {
        let center = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let neighbors = center.neighbors();
        assert_eq!(neighbors.len(), 4);

        // Fixed order: up, down, left, right.
        assert_eq!(neighbors[0], board([[1, 0, 3], [4, 2, 5], [6, 7, 8]]));
        assert_eq!(neighbors[1], board([[1, 2, 3], [4, 7, 5], [6, 0, 8]]));
        assert_eq!(neighbors[2], board([[1, 2, 3], [0, 4, 5], [6, 7, 8]]));
        assert_eq!(neighbors[3], board([[1, 2, 3], [4, 5, 0], [6, 7, 8]]));
    }

    #[test]
    fn test_neighbors_corner_blank() {
        assert_eq!(GOAL.neighbors().len(), 2);
        assert_eq!(
            board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]).neighbors().len(),
            2
        );
        // Edge blank has three.
        assert_eq!(
            board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]).neighbors().len(),
            3
        );
    }

    #[test]
    fn test_neighbors_preserve_invariant() {
        for neighbor in board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).neighbors() {
            let grid: Vec<Vec<u8>> = neighbor.into();
            assert!(Board::try_from(grid).is_ok());
        }
    }

    #[test]
    fn test_solvability_parity() {
        assert!(GOAL.is_solvable());
        assert!(board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).is_solvable());
        // Blank moved along the bottom row leaves the tile order (and so
        // the inversion count) untouched.
        assert!(board([[1, 2, 3], [4, 5, 6], [0, 7, 8]]).is_solvable());

        // Swapping one adjacent tile pair flips the parity class.
        assert!(!board([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).is_solvable());
        assert!(!board([[2, 1, 3], [4, 5, 6], [7, 8, 0]]).is_solvable());
    }

    #[test]
    fn test_legal_moves_preserve_solvability() {
        let start = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        for neighbor in start.neighbors() {
            assert!(neighbor.is_solvable());
        }
    }

    #[test]
    fn test_scrambled_is_solvable_and_seeded() {
        let mut rng = SmallRng::seed_from_u64(7);
        let a = Board::scrambled(&mut rng);
        assert!(a.is_solvable());

        let mut rng = SmallRng::seed_from_u64(7);
        let b = Board::scrambled(&mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_round_trip() {
        let parsed: Board = serde_json::from_str("[[1,2,3],[4,0,5],[6,7,8]]").unwrap();
        assert_eq!(parsed, board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]));

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "[[1,2,3],[4,0,5],[6,7,8]]");
    }

    #[test]
    fn test_json_rejects_invalid_grid() {
        assert!(serde_json::from_str::<Board>("[[1,2,3],[4,0,5],[6,7,7]]").is_err());
        assert!(serde_json::from_str::<Board>("[[1,2],[3,4]]").is_err());
    }
}
