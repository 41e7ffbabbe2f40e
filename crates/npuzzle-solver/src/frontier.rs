//! Open-list priority structure for the A* search.
//!
//! `BinaryHeap` is a max-heap, so entries carry `Reverse`-wrapped keys to
//! get lowest-`f`-first behavior. The key includes a monotonically
//! increasing insertion counter, which breaks `f` ties in favor of the
//! earliest-inserted node and keeps extraction order fully deterministic.
//!
//! The frontier holds arena node ids, not nodes; duplicate entries for the
//! same board state are allowed. Filtering against the closed set is the
//! search engine's job and happens at expansion time, not here.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::solver::NodeId;

#[derive(Debug)]
struct Entry {
    /// `(f, insertion sequence)` — lexicographic order under `Reverse`
    /// pops lowest `f` first, oldest first among equals.
    key: Reverse<(u32, u64)>,
    id: NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority queue of generated-but-not-yet-expanded nodes, ordered by `f`.
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
    peak: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            peak: 0,
        }
    }

    /// Insert a node id with its `f = g + h` priority.
    pub fn push(&mut self, id: NodeId, f: u32) {
        self.heap.push(Entry {
            key: Reverse((f, self.next_seq)),
            id,
        });
        self.next_seq += 1;
        if self.heap.len() > self.peak {
            self.peak = self.heap.len();
        }
    }

    /// Remove and return the node id with the lowest `f`, ties going to
    /// the earliest-inserted entry.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier reached, for search-effort reporting.
    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_returns_lowest_f_first() {
        let mut frontier = Frontier::new();
        frontier.push(0, 10);
        frontier.push(1, 5);
        frontier.push(2, 15);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(0));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(7, 3);
        frontier.push(8, 3);
        frontier.push(9, 3);

        assert_eq!(frontier.pop(), Some(7));
        assert_eq!(frontier.pop(), Some(8));
        assert_eq!(frontier.pop(), Some(9));
    }

    #[test]
    fn test_duplicate_ids_allowed() {
        let mut frontier = Frontier::new();
        frontier.push(4, 2);
        frontier.push(4, 1);

        assert_eq!(frontier.pop(), Some(4));
        assert_eq!(frontier.pop(), Some(4));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_peak_tracks_high_water() {
        let mut frontier = Frontier::new();
        frontier.push(0, 1);
        frontier.push(1, 2);
        frontier.push(2, 3);
        assert_eq!(frontier.peak(), 3);

        let _ = frontier.pop();
        let _ = frontier.pop();
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.peak(), 3);
    }
}
