//! Search-order heuristics. None of these affect which mappings exist, only
//! the order in which they are found.

use std::cmp::Reverse;

use crate::index::GraphIndex;

use super::state::MatchState;

/// Pick the next query vertex to map.
///
/// Most constrained first: fewest compatible unmapped targets, then higher
/// degree, ring membership, aromaticity and lowest index. Vertices on the
/// terminal frontier are preferred so the mapped region grows connected;
/// when the frontier is empty every unmapped vertex is eligible, which is
/// how a new query component gets started. Returns `None` when some
/// unmapped vertex has no candidate left, since the branch cannot complete.
pub(super) fn select_query_vertex(
    query: &GraphIndex<'_>,
    target_atoms: usize,
    compat: &[bool],
    state: &MatchState,
) -> Option<usize> {
    let mut best_frontier: Option<(usize, usize)> = None;
    let mut best_any: Option<(usize, usize)> = None;

    for q in 0..query.atom_count() {
        if state.assignment.is_query_mapped(q) {
            continue;
        }
        let row = &compat[q * target_atoms..(q + 1) * target_atoms];
        let count = row
            .iter()
            .enumerate()
            .filter(|&(t, &ok)| ok && !state.assignment.is_target_used(t))
            .count();
        if count == 0 {
            return None;
        }

        let slot = if state.is_query_terminal(q) {
            &mut best_frontier
        } else {
            &mut best_any
        };
        let better = match *slot {
            None => true,
            Some((current, current_count)) => {
                query_key(query, q, count) < query_key(query, current, current_count)
            }
        };
        if better {
            *slot = Some((q, count));
        }
    }

    best_frontier.or(best_any).map(|(q, _)| q)
}

type QueryKey = (usize, Reverse<usize>, Reverse<bool>, Reverse<bool>, usize);

fn query_key(query: &GraphIndex<'_>, q: usize, candidates: usize) -> QueryKey {
    let atom = query.atom(q);
    (
        candidates,
        Reverse(query.degree(q)),
        Reverse(atom.in_ring),
        Reverse(atom.aromatic),
        q,
    )
}

/// Sort target candidates: higher degree, ring, aromatic, then index.
pub(super) fn order_candidates(target: &GraphIndex<'_>, candidates: &mut [usize]) {
    candidates.sort_unstable_by_key(|&t| {
        let atom = target.atom(t);
        (
            Reverse(target.degree(t)),
            Reverse(atom.in_ring),
            Reverse(atom.aromatic),
            t,
        )
    });
}
