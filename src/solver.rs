//! A* solver for the n-puzzle.
//!
//! Two best-first searches run in lock-step: one from the initial board and
//! one from its twin. Exactly one of the two boards can reach the goal, so
//! whichever search dequeues a goal board first settles solvability.
use crate::engine::{Board, Move};
use crate::error::SolverError;
use crate::heuristics::Heuristic;
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a `SearchNode` inside its search's arena.
type NodeId = usize;

/// One step of a candidate solution path.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    /// Moves taken from the root to reach `board`.
    moves: u32,
    previous: Option<NodeId>,
    /// Heuristic value of `board`, computed once so queue comparisons stay cheap.
    heuristic: u32,
}

impl SearchNode {
    /// A* evaluation `f = g + h`.
    fn priority(&self) -> u32 {
        self.moves + self.heuristic
    }
}

/// A single A* search over the boards reachable from one root.
///
/// Nodes live in an append-only arena and refer to their predecessor by
/// index. The open set holds `(priority, id)` keys; ids are handed out in
/// insertion order, so equal priorities dequeue first-in first-out.
struct Search {
    heuristic: Heuristic,
    nodes: Vec<SearchNode>,
    open: BinaryHeap<Reverse<(u32, NodeId)>>,
    expanded: usize,
}

impl Search {
    fn new(root: Board, heuristic: Heuristic) -> Self {
        let mut search = Search {
            heuristic,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            expanded: 0,
        };
        search.push(root, 0, None);
        search
    }

    fn push(&mut self, board: Board, moves: u32, previous: Option<NodeId>) {
        let id = self.nodes.len();
        let node = SearchNode {
            heuristic: self.heuristic.evaluate(&board),
            board,
            moves,
            previous,
        };
        self.open.push(Reverse((node.priority(), id)));
        self.nodes.push(node);
    }

    /// Returns the id of the minimum-priority node if it holds the goal board.
    fn goal_at_front(&self) -> Option<NodeId> {
        let &Reverse((_, id)) = self.open.peek()?;
        self.nodes[id].board.is_goal().then_some(id)
    }

    fn is_exhausted(&self) -> bool {
        self.open.is_empty()
    }

    /// Dequeues the minimum-priority node and enqueues its neighbors, except
    /// the one equal to the node's own predecessor.
    ///
    /// Only that immediate backtrack is suppressed. A board reachable along
    /// several paths may be enqueued more than once; each copy is processed
    /// on its own and the first goal dequeued is still optimal.
    fn step(&mut self) {
        let Some(Reverse((priority, id))) = self.open.pop() else {
            return;
        };
        self.expanded += 1;

        let current = &self.nodes[id];
        let previous = current.previous.map(|p| &self.nodes[p].board);
        let next: Vec<Board> = current
            .board
            .neighbors()
            .filter(|neighbor| Some(neighbor) != previous)
            .collect();
        let moves = current.moves + 1;
        trace!(
            "expanding node {} (priority {}, moves {}): {} successors",
            id,
            priority,
            current.moves,
            next.len()
        );

        for board in next {
            self.push(board, moves, Some(id));
        }
    }

    /// Boards from the root to `id`, in that order.
    fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.nodes[id].moves as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            path.push(self.nodes[current].board.clone());
            cursor = self.nodes[current].previous;
        }
        path.reverse();
        path
    }
}

/// Node counts gathered while solving.
///
/// `enqueued` includes the root of each search. These numbers are diagnostics
/// only and have no influence on the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub enqueued: usize,
    pub twin_expanded: usize,
    pub twin_enqueued: usize,
}

impl SearchStats {
    /// Nodes expanded by both searches together.
    pub fn total_expanded(&self) -> usize {
        self.expanded + self.twin_expanded
    }
}

/// The outcome of solving one board.
///
/// All work happens in the constructor; afterwards the solver is an immutable
/// record of the answer and every query is a plain accessor.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::solver::Solver;
///
/// let board = Board::new(vec![vec![0, 1, 3], vec![4, 2, 5], vec![7, 8, 6]]);
/// let solver = Solver::new(board.clone());
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), 4);
///
/// let path = solver.solution().unwrap();
/// assert_eq!(path.first(), Some(&board));
/// assert!(path.last().unwrap().is_goal());
///
/// let unsolvable = Solver::new(Board::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]));
/// assert!(!unsolvable.is_solvable());
/// assert_eq!(unsolvable.moves(), -1);
/// assert!(unsolvable.solution().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    moves: Option<u32>,
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    /// Solves `initial` with the Manhattan heuristic.
    ///
    /// `initial` must be a valid permutation board (see `Board`). A malformed
    /// board of dimension below 2 that is not already the goal panics when
    /// its twin is built; use `Solver::try_new` to reject it up front.
    pub fn new(initial: Board) -> Self {
        Self::with_heuristic(initial, Heuristic::default())
    }

    /// Solves `initial`, failing with `SolverError::MissingBoard` when no
    /// board is given and `SolverError::DimensionTooSmall` when it is smaller
    /// than 2×2.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// use npuzzle_solver::error::SolverError;
    /// use npuzzle_solver::solver::Solver;
    ///
    /// assert_eq!(Solver::try_new(None).unwrap_err(), SolverError::MissingBoard);
    /// assert_eq!(Solver::try_new(Some(Board::goal(3))).unwrap().moves(), 0);
    /// ```
    pub fn try_new(initial: Option<Board>) -> Result<Self, SolverError> {
        let initial = initial.ok_or(SolverError::MissingBoard)?;
        if initial.dimension() < 2 {
            return Err(SolverError::DimensionTooSmall(initial.dimension()));
        }
        Ok(Self::new(initial))
    }

    /// Solves `initial` ordering the open sets by `heuristic`.
    pub fn with_heuristic(initial: Board, heuristic: Heuristic) -> Self {
        debug!(
            "solving {}x{} board with {} heuristic (manhattan {}, hamming {})",
            initial.dimension(),
            initial.dimension(),
            heuristic,
            initial.manhattan(),
            initial.hamming()
        );

        if initial.is_goal() {
            return Solver {
                moves: Some(0),
                solution: Some(vec![initial]),
                stats: SearchStats {
                    enqueued: 1,
                    ..SearchStats::default()
                },
            };
        }

        let twin = initial.twin();
        let mut original = Search::new(initial, heuristic);
        let mut twin = Search::new(twin, heuristic);
        let goal = race(&mut original, &mut twin);

        let stats = SearchStats {
            expanded: original.expanded,
            enqueued: original.nodes.len(),
            twin_expanded: twin.expanded,
            twin_enqueued: twin.nodes.len(),
        };

        match goal {
            Some(id) => {
                let solution = original.path_to(id);
                let moves = original.nodes[id].moves;
                debug!(
                    "solved in {} moves after expanding {} nodes",
                    moves,
                    stats.total_expanded()
                );
                Solver {
                    moves: Some(moves),
                    solution: Some(solution),
                    stats,
                }
            }
            None => {
                debug!(
                    "twin reached the goal first, board is unsolvable ({} nodes expanded)",
                    stats.total_expanded()
                );
                Solver {
                    moves: None,
                    solution: None,
                    stats,
                }
            }
        }
    }

    /// Returns `true` if the initial board can reach the goal.
    pub fn is_solvable(&self) -> bool {
        self.moves.is_some()
    }

    /// Minimum number of moves to solve the initial board, or `-1` if it is unsolvable.
    pub fn moves(&self) -> i32 {
        self.moves.map_or(-1, |m| m as i32)
    }

    /// Boards of a shortest solution, from the initial board to the goal,
    /// or `None` if the initial board is unsolvable.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// The blank moves that carry the initial board along `solution()`.
    pub fn solution_moves(&self) -> Option<Vec<Move>> {
        self.solution.as_ref().map(|path| {
            path.windows(2)
                .filter_map(|pair| pair[0].move_to(&pair[1]))
                .collect()
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Advances both searches one expansion at a time until one of them has a
/// goal board at the front of its queue.
///
/// Returns the goal node of `original`, or `None` if `twin` got there first.
/// `original` is checked first, so it wins a tie.
fn race(original: &mut Search, twin: &mut Search) -> Option<NodeId> {
    loop {
        if let Some(id) = original.goal_at_front() {
            return Some(id);
        }
        if twin.goal_at_front().is_some() {
            return None;
        }
        if original.is_exhausted() && twin.is_exhausted() {
            return None;
        }
        original.step();
        twin.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::is_solvable_by_parity;
    use crate::utils::board_from_str_array;
    use std::collections::{HashMap, VecDeque};

    /// Exact distance to the goal by breadth-first search, `None` if unreachable.
    fn bfs_distance(start: &Board) -> Option<usize> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start.clone(), 0);
        queue.push_back(start.clone());
        while let Some(board) = queue.pop_front() {
            let d = dist[&board];
            if board.is_goal() {
                return Some(d);
            }
            for neighbor in board.neighbors() {
                if !dist.contains_key(&neighbor) {
                    dist.insert(neighbor.clone(), d + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    fn assert_valid_path(initial: &Board, solver: &Solver) {
        let path = solver.solution().unwrap();
        assert_eq!(path.len() as i32, solver.moves() + 1);
        assert_eq!(&path[0], initial);
        assert!(path.last().unwrap().is_goal());
        for pair in path.windows(2) {
            assert!(
                pair[0].move_to(&pair[1]).is_some(),
                "consecutive boards differ by more than one move:\n{}{}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_goal_board_needs_zero_moves() {
        let board = board_from_str_array(&["1 2 3", "4 5 6", "7 8 0"]).unwrap();
        let solver = Solver::new(board.clone());
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution().unwrap(), &[board]);
        assert_eq!(solver.solution_moves(), Some(Vec::new()));
        assert_eq!(solver.stats().total_expanded(), 0);
    }

    #[test]
    fn test_sample_board() {
        let board = board_from_str_array(&["8 1 3", "4 0 2", "7 6 5"]).unwrap();
        let solver = Solver::new(board.clone());
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 14);
        assert_valid_path(&board, &solver);
    }

    #[test]
    fn test_short_board() {
        let board = board_from_str_array(&["0 1 3", "4 2 5", "7 8 6"]).unwrap();
        let solver = Solver::new(board.clone());
        assert_eq!(solver.moves(), 4);
        assert_eq!(
            solver.solution_moves().unwrap(),
            vec![Move::Right, Move::Down, Move::Right, Move::Down]
        );
        assert_valid_path(&board, &solver);
    }

    #[test]
    fn test_unsolvable_board() {
        let board = board_from_str_array(&["1 2 3", "4 5 6", "8 7 0"]).unwrap();
        let solver = Solver::new(board);
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
        assert!(solver.solution().is_none());
        assert!(solver.solution_moves().is_none());
        assert!(solver.stats().twin_expanded <= solver.stats().twin_enqueued);
    }

    #[test]
    fn test_solution_moves_round_trip() {
        let board = board_from_str_array(&["8 1 3", "4 0 2", "7 6 5"]).unwrap();
        let solver = Solver::new(board.clone());
        let mut replayed = board;
        for m in solver.solution_moves().unwrap() {
            replayed = replayed.apply_move(m).unwrap();
        }
        assert_eq!(&replayed, solver.solution().unwrap().last().unwrap());
        assert_eq!(replayed, Board::goal(3));
    }

    #[test]
    fn test_exactly_one_of_board_and_twin_is_solvable_2x2() {
        let mut tiles: Vec<Vec<u32>> = Vec::new();
        for a in 0..4u32 {
            for b in 0..4u32 {
                for c in 0..4u32 {
                    for d in 0..4u32 {
                        let cand = vec![a, b, c, d];
                        let mut sorted = cand.clone();
                        sorted.sort();
                        if sorted == vec![0, 1, 2, 3] {
                            tiles.push(cand);
                        }
                    }
                }
            }
        }
        assert_eq!(tiles.len(), 24);

        for t in tiles {
            let board = Board::from_tiles(2, t);
            let solver = Solver::new(board.clone());
            let twin_solver = Solver::new(board.twin());
            assert_ne!(solver.is_solvable(), twin_solver.is_solvable(), "{}", board);
            assert_eq!(solver.is_solvable(), is_solvable_by_parity(&board));
            assert_eq!(
                solver.moves(),
                bfs_distance(&board).map_or(-1, |d| d as i32)
            );
        }
    }

    #[test]
    fn test_moves_are_optimal_on_scrambles() {
        for seed in 0..25 {
            let board = Board::new_scrambled_with_seed(3, 4 + (seed % 12) as usize, seed);
            let solver = Solver::new(board.clone());
            assert_eq!(solver.moves() as usize, bfs_distance(&board).unwrap());
            assert_valid_path(&board, &solver);
        }
    }

    #[test]
    fn test_twin_of_scramble_is_unsolvable() {
        for seed in 0..10 {
            let board = Board::new_scrambled_with_seed(3, 10, seed);
            let solver = Solver::new(board.twin());
            assert!(!solver.is_solvable());
            assert_eq!(solver.moves(), -1);
        }
    }

    #[test]
    fn test_hamming_finds_same_length() {
        let board = board_from_str_array(&["8 1 3", "4 0 2", "7 6 5"]).unwrap();
        let manhattan = Solver::with_heuristic(board.clone(), Heuristic::Manhattan);
        let hamming = Solver::with_heuristic(board.clone(), Heuristic::Hamming);
        assert_eq!(manhattan.moves(), hamming.moves());
        assert_valid_path(&board, &hamming);
    }

    #[test]
    fn test_four_by_four() {
        let board = Board::new_scrambled_with_seed(4, 18, 42);
        let solver = Solver::new(board.clone());
        assert!(solver.is_solvable());
        assert!(solver.moves() <= 18);
        assert_eq!(solver.moves() % 2, 18 % 2);
        assert_valid_path(&board, &solver);
    }

    #[test]
    fn test_deterministic_solution() {
        let board = Board::new_scrambled_with_seed(3, 16, 9);
        let first = Solver::new(board.clone());
        let second = Solver::new(board);
        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn test_try_new_rejects_missing_or_tiny_board() {
        assert_eq!(Solver::try_new(None).unwrap_err(), SolverError::MissingBoard);
        let tiny = Board::from_tiles(1, vec![0]);
        assert_eq!(
            Solver::try_new(Some(tiny)).unwrap_err(),
            SolverError::DimensionTooSmall(1)
        );
        let solver = Solver::try_new(Some(Board::goal(2))).unwrap();
        assert_eq!(solver.moves(), 0);
    }
}
