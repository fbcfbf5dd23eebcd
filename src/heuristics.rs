use crate::engine::Board;
use std::fmt;

/// Priority function used to estimate the moves remaining from a board.
///
/// Both variants are admissible, so A* returns an optimal solution with
/// either one. `Manhattan` dominates `Hamming` and expands far fewer nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Sum of per-tile grid distances to the goal position.
    #[default]
    Manhattan,
    /// Number of tiles out of place.
    Hamming,
}

impl Heuristic {
    /// Estimates the number of moves from `board` to the goal.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// use npuzzle_solver::heuristics::Heuristic;
    ///
    /// let board = Board::new(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]);
    /// assert_eq!(Heuristic::Manhattan.evaluate(&board), 10);
    /// assert_eq!(Heuristic::Hamming.evaluate(&board), 5);
    /// ```
    pub fn evaluate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => board.manhattan(),
            Heuristic::Hamming => board.hamming(),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Hamming => write!(f, "hamming"),
        }
    }
}

/// Counts pairs of non-blank tiles that appear in the wrong relative order
/// when the board is read row by row.
pub fn inversions(board: &Board) -> usize {
    let tiles: Vec<u32> = board.tiles().iter().copied().filter(|&t| t != 0).collect();
    tiles
        .iter()
        .enumerate()
        .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

/// Decides solvability directly from the inversion parity.
///
/// For odd `n` a board is solvable iff its inversion count is even. For even
/// `n` it is solvable iff the inversion count plus the blank's row index is
/// odd. The solver does not use this; it reaches the same answer by racing
/// the board against its twin, and this predicate serves as an independent check.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::is_solvable_by_parity;
///
/// assert!(is_solvable_by_parity(&Board::goal(4)));
/// let swapped = Board::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]);
/// assert!(!is_solvable_by_parity(&swapped));
/// ```
pub fn is_solvable_by_parity(board: &Board) -> bool {
    let inv = inversions(board);
    if board.dimension() % 2 == 1 {
        inv % 2 == 0
    } else {
        let blank_row = board.blank_position().map_or(0, |(r, _)| r);
        (inv + blank_row) % 2 == 1
    }
}
