use crate::index::GraphIndex;
use crate::mapping::Assignment;

/// Partial mapping plus the depth-stamped terminal sets.
///
/// A stamp of `0` means "not terminal"; otherwise it is the mapping depth at
/// which the vertex first became adjacent to the mapped region. Undoing a
/// pair clears only the stamps made at that depth.
#[derive(Clone, Debug)]
pub(super) struct MatchState {
    pub(super) assignment: Assignment,
    query_terminal: Vec<usize>,
    target_terminal: Vec<usize>,
}

/// Unmapped neighbours of a vertex, split by terminal membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct NeighborCounts {
    pub(super) terminal: usize,
    pub(super) fresh: usize,
}

impl NeighborCounts {
    pub(super) const fn total(self) -> usize {
        self.terminal + self.fresh
    }
}

impl MatchState {
    pub(super) fn new(query_atoms: usize, target_atoms: usize) -> Self {
        Self {
            assignment: Assignment::new(query_atoms, target_atoms),
            query_terminal: vec![0; query_atoms],
            target_terminal: vec![0; target_atoms],
        }
    }

    pub(super) fn push(&mut self, q: usize, t: usize, query: &GraphIndex<'_>, target: &GraphIndex<'_>) {
        self.assignment.assign(q, t);
        let depth = self.assignment.len();

        for &n in query.neighbors(q) {
            if self.query_terminal[n] == 0 && !self.assignment.is_query_mapped(n) {
                self.query_terminal[n] = depth;
            }
        }
        for &m in target.neighbors(t) {
            if self.target_terminal[m] == 0 && !self.assignment.is_target_used(m) {
                self.target_terminal[m] = depth;
            }
        }
    }

    pub(super) fn pop(&mut self, q: usize, t: usize, query: &GraphIndex<'_>, target: &GraphIndex<'_>) {
        let depth = self.assignment.len();

        for &n in query.neighbors(q) {
            if self.query_terminal[n] == depth {
                self.query_terminal[n] = 0;
            }
        }
        for &m in target.neighbors(t) {
            if self.target_terminal[m] == depth {
                self.target_terminal[m] = 0;
            }
        }
        self.assignment.unassign(q, t);
    }

    /// Unmapped and adjacent to the mapped region.
    pub(super) fn is_query_terminal(&self, q: usize) -> bool {
        self.query_terminal[q] != 0 && !self.assignment.is_query_mapped(q)
    }

    pub(super) fn is_target_terminal(&self, t: usize) -> bool {
        self.target_terminal[t] != 0 && !self.assignment.is_target_used(t)
    }

    pub(super) fn query_neighbor_counts(&self, q: usize, query: &GraphIndex<'_>) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for &n in query.neighbors(q) {
            if self.assignment.is_query_mapped(n) {
                continue;
            }
            if self.is_query_terminal(n) {
                counts.terminal += 1;
            } else {
                counts.fresh += 1;
            }
        }
        counts
    }

    pub(super) fn target_neighbor_counts(&self, t: usize, target: &GraphIndex<'_>) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for &m in target.neighbors(t) {
            if self.assignment.is_target_used(m) {
                continue;
            }
            if self.is_target_terminal(m) {
                counts.terminal += 1;
            } else {
                counts.fresh += 1;
            }
        }
        counts
    }
}
