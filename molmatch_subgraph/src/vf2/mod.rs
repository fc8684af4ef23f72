//! VF2-style substructure search.
//!
//! A depth-first search over partial injective mappings from query atoms to
//! target atoms. Candidate pairs are bounded by a precomputed compatibility
//! matrix, filtered by the terminal-set look-ahead and verified against
//! every already-mapped query neighbour before the search descends.

mod heuristics;
mod state;

use std::collections::HashSet;
use std::ops::ControlFlow;

use molmatch_common::{ChemOptions, MolGraph};
use tracing::{debug, info, trace};

use crate::budget::{Expired, SearchOutcome, TimeBudget};
use crate::compat::{atoms_compatible, bonds_compatible, degree_admissible};
use crate::index::GraphIndex;
use crate::mapping::AtomMapping;

use self::state::MatchState;

/// Substructure search of one query inside one target.
///
/// Construction indexes both graphs and fills the compatibility matrix;
/// each call to [`exists`](Self::exists) or [`enumerate`](Self::enumerate)
/// then runs an independent search with its own deadline.
pub struct SubstructureMatcher<'q, 't, 'cfg> {
    query: GraphIndex<'q>,
    target: GraphIndex<'t>,
    opts: &'cfg ChemOptions,
    /// `compat[q * |T| + t]`: atom rule and degree rule both hold.
    compat: Vec<bool>,
}

/// Accumulates complete mappings, de-duplicated by target image tuple.
struct Collector {
    /// `0` means unbounded.
    limit: usize,
    seen: HashSet<Vec<usize>>,
    found: Vec<AtomMapping>,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            found: Vec::new(),
        }
    }

    fn record(&mut self, state: &MatchState) -> ControlFlow<()> {
        let mapping = state.assignment.to_mapping();
        if self.seen.insert(mapping.signature()) {
            trace!("match #{}: {:?}", self.found.len() + 1, mapping);
            self.found.push(mapping);
        }
        if self.limit != 0 && self.found.len() >= self.limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<'q, 't, 'cfg> SubstructureMatcher<'q, 't, 'cfg> {
    /// Index both graphs and precompute atom compatibility.
    pub fn new<Q, T>(query: &'q Q, target: &'t T, opts: &'cfg ChemOptions) -> Self
    where
        Q: MolGraph + ?Sized,
        T: MolGraph + ?Sized,
    {
        let query = GraphIndex::build(query);
        let target = GraphIndex::build(target);

        let target_atoms = target.atom_count();
        let mut compat = vec![false; query.atom_count() * target_atoms];
        for q in 0..query.atom_count() {
            for t in 0..target_atoms {
                compat[q * target_atoms + t] =
                    degree_admissible(query.degree(q), target.degree(t), opts.degree_slack)
                        && atoms_compatible(query.atom(q), target.atom(t), opts);
            }
        }

        SubstructureMatcher {
            query,
            target,
            opts,
            compat,
        }
    }

    /// Does the query occur in the target at all?
    pub fn exists(&self, timeout_ms: u64) -> SearchOutcome<bool> {
        self.run(1, timeout_ms).map(|found| !found.is_empty())
    }

    /// All distinct embeddings, in discovery order, up to `max_matches`
    /// (`0` for no limit). On timeout the matches found so far are returned.
    pub fn enumerate(&self, max_matches: usize, timeout_ms: u64) -> SearchOutcome<Vec<AtomMapping>> {
        self.run(max_matches, timeout_ms)
    }

    fn run(&self, limit: usize, timeout_ms: u64) -> SearchOutcome<Vec<AtomMapping>> {
        let query_atoms = self.query.atom_count();
        let target_atoms = self.target.atom_count();
        info!(
            "substructure search: {} query atoms, {} target atoms, limit {}, timeout {} ms",
            query_atoms, target_atoms, limit, timeout_ms
        );

        if self.query.is_empty() {
            return SearchOutcome::complete(vec![AtomMapping::new()]);
        }
        if query_atoms > target_atoms {
            debug!("query larger than target, no embedding possible");
            return SearchOutcome::complete(Vec::new());
        }

        let budget = TimeBudget::from_millis(timeout_ms);
        let mut state = MatchState::new(query_atoms, target_atoms);
        let mut collector = Collector::new(limit);

        let timed_out = self.search(&mut state, &mut collector, &budget).is_err();
        if timed_out {
            info!(
                "substructure search timed out with {} matches",
                collector.found.len()
            );
        } else {
            info!("substructure search found {} matches", collector.found.len());
        }

        SearchOutcome {
            value: collector.found,
            timed_out,
        }
    }

    fn search(
        &self,
        state: &mut MatchState,
        collector: &mut Collector,
        budget: &TimeBudget,
    ) -> Result<ControlFlow<()>, Expired> {
        budget.check()?;

        if state.assignment.is_complete() {
            return Ok(collector.record(state));
        }

        let Some(q) = heuristics::select_query_vertex(
            &self.query,
            self.target.atom_count(),
            &self.compat,
            state,
        ) else {
            return Ok(ControlFlow::Continue(()));
        };

        let mut candidates = self.candidates(q, state);
        heuristics::order_candidates(&self.target, &mut candidates);

        for t in candidates {
            budget.check()?;
            if !self.edges_consistent(q, t, state) {
                continue;
            }

            state.push(q, t, &self.query, &self.target);
            let flow = self.search(state, collector, budget);
            state.pop(q, t, &self.query, &self.target);

            if flow?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Compatible, unused targets that pass the look-ahead.
    ///
    /// Every unmapped query neighbour of `q` must land on a distinct unmapped
    /// target neighbour of `t`, and a terminal query neighbour can only land
    /// on a terminal target neighbour.
    fn candidates(&self, q: usize, state: &MatchState) -> Vec<usize> {
        let target_atoms = self.target.atom_count();
        let row = &self.compat[q * target_atoms..(q + 1) * target_atoms];
        let need = state.query_neighbor_counts(q, &self.query);

        (0..target_atoms)
            .filter(|&t| row[t] && !state.assignment.is_target_used(t))
            .filter(|&t| {
                let have = state.target_neighbor_counts(t, &self.target);
                need.terminal <= have.terminal && need.total() <= have.total()
            })
            .collect()
    }

    /// Every mapped neighbour of `q` must be bonded to `t` by a compatible
    /// bond.
    fn edges_consistent(&self, q: usize, t: usize, state: &MatchState) -> bool {
        self.query.neighbors(q).iter().all(|&n| {
            let Some(m) = state.assignment.image(n) else {
                return true;
            };
            match (self.query.bond(q, n), self.target.bond(t, m)) {
                (Some(qb), Some(tb)) => bonds_compatible(qb, tb, self.opts),
                _ => false,
            }
        })
    }
}
