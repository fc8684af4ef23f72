//! Branch-and-bound maximum clique over bitset adjacency.
//!
//! Bron–Kerbosch with a Tomita pivot, pruned by a greedy colouring bound.
//! Bitsets are always walked from the low bit upwards so the first maximum
//! clique found is reproducible.

use std::cmp::Reverse;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::budget::{Expired, SearchOutcome, TimeBudget};

/// Find a maximum clique of the graph given by `adjacency`.
///
/// `adjacency[v]` holds the neighbours of `v` and must not contain `v`.
/// If the budget expires the largest clique seen so far is returned.
pub fn max_clique(adjacency: &[BitSet], budget: &TimeBudget) -> SearchOutcome<BitSet> {
    let mut search = CliqueSearch {
        adjacency,
        budget,
        best: BitSet::with_capacity(adjacency.len()),
        best_len: 0,
    };

    let candidates: BitSet = (0..adjacency.len()).collect();
    let result = search.expand(&BitSet::new(), candidates, BitSet::new());
    debug!(
        "max clique: {} of {} nodes{}",
        search.best_len,
        adjacency.len(),
        if result.is_err() { " (timed out)" } else { "" }
    );

    SearchOutcome {
        value: search.best,
        timed_out: result.is_err(),
    }
}

struct CliqueSearch<'a> {
    adjacency: &'a [BitSet],
    budget: &'a TimeBudget,
    /// Updated on every improvement so an abort keeps it.
    best: BitSet,
    best_len: usize,
}

impl CliqueSearch<'_> {
    fn expand(&mut self, clique: &BitSet, mut candidates: BitSet, mut excluded: BitSet) -> Result<(), Expired> {
        self.budget.check()?;

        let size = clique.len();
        if size > self.best_len {
            trace!("clique improved to {}", size);
            self.best = clique.clone();
            self.best_len = size;
        }
        if candidates.is_empty() {
            return Ok(());
        }
        if size + candidates.len() <= self.best_len
            || size + greedy_color_bound(&candidates, self.adjacency) <= self.best_len
        {
            return Ok(());
        }

        let Some(pivot) = self.pivot(&candidates, &excluded) else {
            return Ok(());
        };
        let branch: Vec<usize> = candidates.difference(&self.adjacency[pivot]).collect();

        for v in branch {
            self.budget.check()?;

            let mut next_clique = clique.clone();
            next_clique.insert(v);
            let mut next_candidates = candidates.clone();
            next_candidates.intersect_with(&self.adjacency[v]);
            let mut next_excluded = excluded.clone();
            next_excluded.intersect_with(&self.adjacency[v]);

            self.expand(&next_clique, next_candidates, next_excluded)?;

            candidates.remove(v);
            excluded.insert(v);
        }
        Ok(())
    }

    /// Vertex of `P ∪ X` with the most neighbours in `P`; lowest index on ties.
    fn pivot(&self, candidates: &BitSet, excluded: &BitSet) -> Option<usize> {
        candidates.union(excluded).max_by_key(|&u| {
            (
                self.adjacency[u].intersection(candidates).count(),
                Reverse(u),
            )
        })
    }
}

/// Number of colour classes in a greedy colouring of the subgraph induced by
/// `candidates`.
///
/// Each class is an independent set, so a clique takes at most one vertex
/// per class and the class count bounds the clique size from above.
pub(crate) fn greedy_color_bound(candidates: &BitSet, adjacency: &[BitSet]) -> usize {
    let mut remaining = candidates.clone();
    let mut colors = 0;

    while !remaining.is_empty() {
        colors += 1;
        let mut class = BitSet::with_capacity(adjacency.len());
        let pending: Vec<usize> = remaining.iter().collect();
        for v in pending {
            if adjacency[v].is_disjoint(&class) {
                class.insert(v);
                remaining.remove(v);
            }
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Vec<BitSet> {
        let mut adjacency = vec![BitSet::with_capacity(n); n];
        for &(a, b) in edges {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
        adjacency
    }

    fn members(set: &BitSet) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn finds_the_triangle() {
        // A square 0-1-2-3 with a triangle 3-4-5 hanging off it.
        let adjacency = graph(6, &[(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5), (5, 3)]);
        let outcome = max_clique(&adjacency, &TimeBudget::from_millis(5_000));
        assert!(!outcome.timed_out);
        assert_eq!(members(&outcome.value), vec![3, 4, 5]);
    }

    #[test]
    fn complete_graph() {
        let edges: Vec<_> = (0..5)
            .flat_map(|a| ((a + 1)..5).map(move |b| (a, b)))
            .collect();
        let adjacency = graph(5, &edges);
        let outcome = max_clique(&adjacency, &TimeBudget::from_millis(5_000));
        assert_eq!(outcome.value.len(), 5);
    }

    #[test]
    fn edgeless_graph_gives_single_vertex() {
        let adjacency = graph(4, &[]);
        let outcome = max_clique(&adjacency, &TimeBudget::from_millis(5_000));
        assert_eq!(members(&outcome.value), vec![0]);
        assert!(max_clique(&[], &TimeBudget::from_millis(5_000)).value.is_empty());
    }

    #[test]
    fn coloring_bound_never_undercounts() {
        let adjacency = graph(5, &[(0, 1), (1, 2), (2, 0), (3, 4)]);
        let all: BitSet = (0..5).collect();
        let bound = greedy_color_bound(&all, &adjacency);
        assert!(bound >= 3);
        assert_eq!(greedy_color_bound(&BitSet::new(), &adjacency), 0);
        let independent: BitSet = [0, 3].into_iter().collect();
        assert_eq!(greedy_color_bound(&independent, &adjacency), 1);
    }

    #[test]
    fn expired_budget_returns_empty() {
        let adjacency = graph(3, &[(0, 1), (1, 2)]);
        let outcome = max_clique(&adjacency, &TimeBudget::from_millis(0));
        assert!(outcome.timed_out);
        assert!(outcome.value.is_empty());
    }
}
