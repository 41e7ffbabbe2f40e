//! Bounded A* search engine over board states.
//!
//! Nodes live in an index-addressed arena; a node's parent is an arena
//! index, so entries can leave the frontier while descendants still hold a
//! valid back-reference for path reconstruction. The frontier orders node
//! ids by `f = g + h` with a stable tie-break, and a closed set of board
//! keys prevents re-expansion. Because the Manhattan heuristic is
//! admissible and consistent, the first goal node extracted carries the
//! minimum `g`, so expanded states never need reopening.
//!
//! Every structure here is owned by a single [`solve`] call and dropped on
//! return; concurrent calls share nothing.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::frontier::Frontier;

/// Index of a node in the search arena.
pub type NodeId = usize;

/// One element of the search tree.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    board: Board,
    /// Cost from the start node, in moves.
    g: u32,
    /// Heuristic estimate of the remaining moves.
    h: u32,
    parent: Option<NodeId>,
}

impl SearchNode {
    /// Total estimated cost through this node. Derived, never stored.
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Bounds on a single search.
///
/// Exceeding either bound terminates the search with
/// [`SearchOutcome::ResourceExhausted`], which is distinct from proving the
/// board unsolvable.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum node expansions before giving up.
    pub max_expansions: usize,
    /// Maximum wall-clock time before giving up.
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: 1_000_000,
            timeout: Duration::from_secs(15),
        }
    }
}

/// An ordered move sequence from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Consecutive boards differ by exactly one blank swap; the first is
    /// the start board, the last is the goal.
    pub path: Vec<Board>,
}

impl Solution {
    /// Number of moves (one less than the number of boards).
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }
}

/// Terminal state of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Goal reached; the path is optimal in move count.
    Solved(Solution),
    /// Reachable state space exhausted without finding the goal (the
    /// start board is in the wrong parity class).
    Unsolvable,
    /// An expansion or time bound was hit first; says nothing about
    /// solvability.
    ResourceExhausted,
}

/// Search outcome plus effort statistics.
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: SearchOutcome,
    /// Nodes popped from the frontier and expanded.
    pub nodes_expanded: usize,
    /// Nodes created, the root included.
    pub nodes_generated: usize,
    /// Largest frontier size reached.
    pub peak_frontier: usize,
    pub time_elapsed_ms: u64,
}

/// Run A* from `start` toward the goal arrangement.
///
/// `start` is already a valid permutation by [`Board`] construction, so
/// the only non-solved outcomes are exhaustion of the reachable state
/// space and running out of budget.
pub fn solve(start: Board, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let deadline = start_time + config.timeout;

    let mut arena: Vec<SearchNode> = Vec::new();
    let mut frontier = Frontier::new();
    let mut closed: HashSet<Board> = HashSet::new();

    let root = SearchNode {
        board: start,
        g: 0,
        h: start.manhattan_distance(),
        parent: None,
    };
    let root_f = root.f();
    arena.push(root);
    frontier.push(0, root_f);

    let mut nodes_expanded = 0usize;
    let mut nodes_generated = 1usize;

    while let Some(id) = frontier.pop() {
        let node = arena[id];

        // A duplicate frontier entry whose state was already expanded via
        // a cheaper node; the closed-set check happens here, at expansion
        // time, never at insertion.
        if closed.contains(&node.board) {
            continue;
        }

        if node.board.is_goal() {
            return SolverResult {
                outcome: SearchOutcome::Solved(reconstruct_path(&arena, id)),
                nodes_expanded,
                nodes_generated,
                peak_frontier: frontier.peak(),
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        if nodes_expanded >= config.max_expansions || Instant::now() > deadline {
            return SolverResult {
                outcome: SearchOutcome::ResourceExhausted,
                nodes_expanded,
                nodes_generated,
                peak_frontier: frontier.peak(),
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        closed.insert(node.board);
        nodes_expanded += 1;

        for neighbor in node.board.neighbors() {
            if closed.contains(&neighbor) {
                continue;
            }
            let successor = SearchNode {
                board: neighbor,
                g: node.g + 1,
                h: neighbor.manhattan_distance(),
                parent: Some(id),
            };
            let f = successor.f();
            let successor_id = arena.len();
            arena.push(successor);
            frontier.push(successor_id, f);
            nodes_generated += 1;
        }
    }

    // Frontier drained without reaching the goal: the start board lies in
    // the parity class from which the goal is unreachable.
    SolverResult {
        outcome: SearchOutcome::Unsolvable,
        nodes_expanded,
        nodes_generated,
        peak_frontier: frontier.peak(),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// Walk parent indices from the goal node back to the root, then reverse.
fn reconstruct_path(arena: &[SearchNode], goal_id: NodeId) -> Solution {
    let mut path = Vec::new();
    let mut current = Some(goal_id);
    while let Some(id) = current {
        path.push(arena[id].board);
        current = arena[id].parent;
    }
    path.reverse();
    Solution { path }
}
