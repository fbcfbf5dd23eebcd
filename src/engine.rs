//! Board representation for the n-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: A single step of the blank cell (up, down, left or right).
//! - `Board`: An immutable n×n tile configuration with the distance metrics,
//!   goal test, neighbor generation and twin construction the solver relies on.
//!
//! Every operation that "changes" a board returns a new `Board`; the tile grid
//! of an existing value is never mutated.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// A move of the blank cell.
///
/// The variant names the direction the *blank* travels, so `Move::Up` slides
/// the tile above the blank down into the empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order `Board::neighbors` enumerates them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the `(row, column)` offset this move applies to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// Returns the move that undoes this one.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Move;
    /// assert_eq!(Move::Up.opposite(), Move::Down);
    /// assert_eq!(Move::Left.opposite(), Move::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An n×n sliding-tile configuration.
///
/// Tiles are stored row-major; the value `0` is the blank. A well-formed board
/// holds every value in `0..n*n` exactly once and has `n >= 2`. Constructors do
/// not check this: validating untrusted input is the job of the parsing layer
/// (see `crate::utils`).
///
/// Two boards are equal iff their tile grids are equal, and the derived `Hash`
/// covers the full tile sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Vec<u32>,
}

impl Board {
    /// Creates a board from a grid of rows, where `rows[r][c]` is the tile at `(r, c)`.
    ///
    /// # Arguments
    /// * `rows`: `n` rows of `n` tiles each. The grid is assumed to be a valid
    ///   permutation of `0..n*n`; only squareness is checked, and only in debug builds.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]);
    /// assert_eq!(board.dimension(), 3);
    /// assert_eq!(board.tile(1, 1), 0);
    /// ```
    pub fn new(rows: Vec<Vec<u32>>) -> Self {
        let n = rows.len();
        debug_assert!(rows.iter().all(|row| row.len() == n), "board must be square");
        Board {
            n,
            tiles: rows.into_iter().flatten().collect(),
        }
    }

    /// Creates a board of dimension `n` from its tiles in row-major order.
    ///
    /// The same unchecked precondition as `Board::new` applies.
    pub fn from_tiles(n: usize, tiles: Vec<u32>) -> Self {
        debug_assert_eq!(tiles.len(), n * n, "expected n*n tiles");
        Board { n, tiles }
    }

    /// Returns the goal board of dimension `n`: tiles `1..n*n` in row-major
    /// order followed by the blank in the last cell.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let goal = Board::goal(2);
    /// assert_eq!(goal.tiles(), &[1, 2, 3, 0]);
    /// assert!(goal.is_goal());
    /// ```
    pub fn goal(n: usize) -> Self {
        let len = n * n;
        let tiles = (1..len as u32).chain(std::iter::once(0)).collect();
        Board { n, tiles }
    }

    /// Creates a solvable board by walking the blank `steps` random moves away
    /// from the goal, never immediately undoing the previous move.
    ///
    /// The same `(n, steps, seed)` always produces the same board. Because the
    /// board is reached by legal moves from the goal, its optimal solution is
    /// at most `steps` moves long.
    ///
    /// # Arguments
    /// * `n`: Board dimension (at least 2).
    /// * `steps`: Number of blank moves to perform.
    /// * `seed`: Seed for the `SmallRng` driving the walk.
    pub fn new_scrambled_with_seed(n: usize, steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal(n);
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let candidates: Vec<(Move, Board)> = Move::ALL
                .iter()
                .filter(|&&m| last.map_or(true, |prev| m != prev.opposite()))
                .filter_map(|&m| board.apply_move(m).map(|next| (m, next)))
                .collect();

            match candidates.choose(&mut rng) {
                Some((m, next)) => {
                    last = Some(*m);
                    board = next.clone();
                }
                None => break,
            }
        }
        board
    }

    /// Returns the board dimension `n`.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `dimension()`.
    pub fn tile(&self, r: usize, c: usize) -> u32 {
        assert!(r < self.n && c < self.n, "({}, {}) is outside the board", r, c);
        self.tiles[r * self.n + c]
    }

    /// Returns all tiles in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Returns the `(row, column)` of the blank, or `None` for a malformed
    /// board without one.
    pub fn blank_position(&self) -> Option<(usize, usize)> {
        self.tiles
            .iter()
            .position(|&t| t == 0)
            .map(|idx| (idx / self.n, idx % self.n))
    }

    /// Goal `(row, column)` of a non-blank tile.
    fn goal_position(&self, tile: u32) -> (usize, usize) {
        let idx = tile as usize - 1;
        (idx / self.n, idx % self.n)
    }

    /// Number of non-blank tiles that are not in their goal position.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]);
    /// assert_eq!(board.hamming(), 5);
    /// ```
    pub fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(idx, &t)| t != 0 && t as usize != idx + 1)
            .count() as u32
    }

    /// Sum over non-blank tiles of the row and column distance between each
    /// tile and its goal position.
    ///
    /// This is the search heuristic. It never overestimates the number of
    /// moves left, and a single move changes it by exactly one.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]);
    /// assert_eq!(board.manhattan(), 10);
    /// ```
    pub fn manhattan(&self) -> u32 {
        let mut distance = 0;
        for (idx, &t) in self.tiles.iter().enumerate() {
            if t == 0 {
                continue;
            }
            let (r, c) = (idx / self.n, idx % self.n);
            let (goal_r, goal_c) = self.goal_position(t);
            distance += r.abs_diff(goal_r) + c.abs_diff(goal_c);
        }
        distance as u32
    }

    /// Returns `true` iff this is the goal board (`hamming() == 0`).
    pub fn is_goal(&self) -> bool {
        self.hamming() == 0
    }

    /// Returns the board obtained by moving the blank one cell in direction `m`,
    /// or `None` if that would leave the grid (or the board has no blank).
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::{Board, Move};
    /// let goal = Board::goal(2);
    /// let up = goal.apply_move(Move::Up).unwrap();
    /// assert_eq!(up.tiles(), &[1, 0, 3, 2]);
    /// assert!(goal.apply_move(Move::Down).is_none());
    /// ```
    pub fn apply_move(&self, m: Move) -> Option<Board> {
        let (r, c) = self.blank_position()?;
        let (dr, dc) = m.offset();
        let new_r = r.checked_add_signed(dr).filter(|&v| v < self.n)?;
        let new_c = c.checked_add_signed(dc).filter(|&v| v < self.n)?;

        let mut tiles = self.tiles.clone();
        tiles.swap(r * self.n + c, new_r * self.n + new_c);
        Some(Board { n: self.n, tiles })
    }

    /// Returns every board reachable by one legal blank move.
    ///
    /// Boards are produced in `Move::ALL` order (blank up, down, left, right),
    /// which makes the search reproducible. A corner blank yields 2 neighbors,
    /// an edge blank 3 and an interior blank 4.
    pub fn neighbors(&self) -> impl Iterator<Item = Board> + '_ {
        Move::ALL.into_iter().filter_map(move |m| self.apply_move(m))
    }

    /// Returns the single blank move that turns `self` into `other`, if there is one.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::{Board, Move};
    /// let goal = Board::goal(3);
    /// let left = goal.apply_move(Move::Left).unwrap();
    /// assert_eq!(goal.move_to(&left), Some(Move::Left));
    /// assert_eq!(left.move_to(&goal), Some(Move::Right));
    /// assert_eq!(goal.move_to(&goal), None);
    /// ```
    pub fn move_to(&self, other: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&m| self.apply_move(m).as_ref() == Some(other))
    }

    /// Returns the twin: this board with one pair of horizontally adjacent,
    /// non-blank tiles swapped.
    ///
    /// The first two cells of row 0 are swapped unless one of them is the
    /// blank, in which case the first two cells of row 1 are swapped. Exactly
    /// one of a board and its twin can reach the goal.
    ///
    /// # Panics
    /// Panics if `dimension() < 2`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![0, 1], vec![2, 3]]);
    /// assert_eq!(board.twin().tiles(), &[0, 1, 3, 2]);
    /// ```
    pub fn twin(&self) -> Board {
        assert!(self.n >= 2, "twin requires a board of dimension at least 2");
        let row = if self.tiles[0] != 0 && self.tiles[1] != 0 { 0 } else { 1 };
        let mut tiles = self.tiles.clone();
        tiles.swap(row * self.n, row * self.n + 1);
        Board { n: self.n, tiles }
    }
}

impl fmt::Display for Board {
    /// Formats the board as its dimension on the first line followed by one
    /// line per row, each tile right-aligned in a fixed-width cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let largest = (self.n * self.n).saturating_sub(1);
        let width = largest.to_string().len().max(2);

        writeln!(f, "{}", self.n)?;
        for row in self.tiles.chunks(self.n.max(1)) {
            for &t in row {
                write!(f, "{:>width$} ", t, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
