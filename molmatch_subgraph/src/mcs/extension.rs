//! Best-first greedy growth of a seed mapping, one atom pair at a time.
//!
//! The clique stage judges pairs edge by edge; once bond orders are relaxed
//! some atoms it left out can still be attached consistently. This pass
//! explores larger mappings first and is bounded both by the shared budget
//! and by its own short deadline.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use molmatch_common::ChemOptions;
use tracing::{debug, trace};

use crate::budget::{SearchOutcome, TimeBudget};
use crate::compat::{atoms_compatible, bonds_compatible};
use crate::index::GraphIndex;
use crate::mapping::{AtomMapping, Assignment};

/// Upper bound on queued partial mappings.
const MAX_PENDING: usize = 4096;

struct Pending {
    assignment: Assignment,
    seq: u64,
}

impl Pending {
    fn key(&self) -> (usize, Reverse<u64>) {
        (self.assignment.len(), Reverse(self.seq))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// Larger mappings first, then insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

pub(crate) struct GreedyExtension<'g, 'q, 't> {
    query: &'g GraphIndex<'q>,
    target: &'g GraphIndex<'t>,
    opts: &'g ChemOptions,
}

impl<'g, 'q, 't> GreedyExtension<'g, 'q, 't> {
    pub(crate) const fn new(
        query: &'g GraphIndex<'q>,
        target: &'g GraphIndex<'t>,
        opts: &'g ChemOptions,
    ) -> Self {
        Self {
            query,
            target,
            opts,
        }
    }

    /// Grow `seed` for at most `local_ms` (and never past `budget`).
    ///
    /// The result always contains the seed. `timed_out` is set only when the
    /// shared budget ran out, not when the local deadline did.
    pub(crate) fn extend(
        &self,
        seed: &AtomMapping,
        budget: &TimeBudget,
        local_ms: u64,
    ) -> SearchOutcome<AtomMapping> {
        let local = budget.child(local_ms);
        let start = Assignment::from_mapping(seed, self.query.atom_count(), self.target.atom_count());

        let mut best = start.clone();
        let mut visited: HashSet<Vec<Option<usize>>> = HashSet::new();
        let mut queue = BinaryHeap::new();
        let mut seq = 0_u64;
        visited.insert(start.images().to_vec());
        queue.push(Pending {
            assignment: start,
            seq,
        });

        // No mapping can cover more atoms than the smaller graph has.
        let ceiling = self.query.atom_count().min(self.target.atom_count());
        let mut cut_short = false;
        while let Some(Pending { assignment, .. }) = queue.pop() {
            if local.check().is_err() {
                cut_short = true;
                break;
            }
            if assignment.len() > best.len() {
                trace!("extension reached {} pairs", assignment.len());
                best = assignment.clone();
            }
            if best.len() == ceiling {
                break;
            }
            if assignment.is_complete() {
                continue;
            }
            let Some((q, candidates)) = self.most_constrained(&assignment) else {
                continue;
            };

            for t in candidates {
                if queue.len() >= MAX_PENDING {
                    break;
                }
                let mut next = assignment.clone();
                next.assign(q, t);
                if visited.insert(next.images().to_vec()) {
                    seq += 1;
                    queue.push(Pending {
                        assignment: next,
                        seq,
                    });
                }
            }
        }

        let grown = best.to_mapping();
        debug!(
            "greedy extension: {} -> {} pairs{}",
            seed.len(),
            grown.len(),
            if cut_short { " (deadline)" } else { "" }
        );

        SearchOutcome {
            value: grown,
            timed_out: cut_short && budget.remaining().is_zero(),
        }
    }

    /// The frontier vertex with the fewest (but at least one) feasible
    /// targets, falling back to every unmapped vertex when the frontier is
    /// empty or cannot be extended.
    fn most_constrained(&self, assignment: &Assignment) -> Option<(usize, Vec<usize>)> {
        let unmapped: Vec<usize> = (0..self.query.atom_count())
            .filter(|&q| !assignment.is_query_mapped(q))
            .collect();
        let frontier: Vec<usize> = unmapped
            .iter()
            .copied()
            .filter(|&q| {
                self.query
                    .neighbors(q)
                    .iter()
                    .any(|&n| assignment.is_query_mapped(n))
            })
            .collect();

        self.pick(&frontier, assignment)
            .or_else(|| self.pick(&unmapped, assignment))
    }

    fn pick(&self, pool: &[usize], assignment: &Assignment) -> Option<(usize, Vec<usize>)> {
        pool.iter()
            .map(|&q| (q, self.feasible_targets(q, assignment)))
            .filter(|(_, targets)| !targets.is_empty())
            .min_by_key(|(q, targets)| (targets.len(), *q))
    }

    fn feasible_targets(&self, q: usize, assignment: &Assignment) -> Vec<usize> {
        (0..self.target.atom_count())
            .filter(|&t| !assignment.is_target_used(t))
            .filter(|&t| atoms_compatible(self.query.atom(q), self.target.atom(t), self.opts))
            .filter(|&t| self.consistent(q, t, assignment))
            .collect()
    }

    /// Every mapped pair agrees with `(q, t)`: both bonds present and
    /// compatible, or both absent.
    fn consistent(&self, q: usize, t: usize, assignment: &Assignment) -> bool {
        assignment
            .pairs()
            .all(|(qm, tm)| match (self.query.bond(q, qm), self.target.bond(t, tm)) {
                (Some(x), Some(y)) => bonds_compatible(x, y, self.opts),
                (None, None) => true,
                _ => false,
            })
    }
}
