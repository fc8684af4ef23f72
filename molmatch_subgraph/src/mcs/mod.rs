//! Maximum common substructure search.
//!
//! One pipeline run is: product graph, maximum clique, clique to mapping,
//! optional largest-fragment filter, optional greedy extension (followed by
//! the filter again). Every run shares one deadline; whichever stage runs out
//! of time hands its best result to the next and the search is flagged as
//! timed out.
//!
//! A single run maximises atom count under one adjacency and one bond-order
//! rule, which is not enough on its own: in induced mode the largest clique
//! can split into fragments smaller than what edge-by-edge growth reaches,
//! and relaxed bond orders can trade bonds for atoms. [`McsSearch::run`]
//! therefore also runs the pipeline under the stricter settings, whose
//! results stay valid under the requested ones, and picks among all of them.

mod clique;
mod components;
mod extension;
mod product;

pub use self::clique::max_clique;
pub use self::components::largest_component;
pub use self::product::ProductGraph;

use molmatch_common::{BondOrderMode, ChemOptions, McsOptions, MolGraph};
use tracing::{debug, info};

use crate::budget::{SearchOutcome, TimeBudget};
use crate::index::GraphIndex;
use crate::mapping::AtomMapping;

use self::extension::GreedyExtension;

/// Maximum common substructure of two molecules under one configuration.
pub struct McsSearch<'q, 't, 'cfg> {
    query: GraphIndex<'q>,
    target: GraphIndex<'t>,
    chem: &'cfg ChemOptions,
    opts: &'cfg McsOptions,
}

impl<'q, 't, 'cfg> McsSearch<'q, 't, 'cfg> {
    /// Index both graphs; no search happens until [`McsSearch::run`].
    pub fn new<Q, T>(query: &'q Q, target: &'t T, chem: &'cfg ChemOptions, opts: &'cfg McsOptions) -> Self
    where
        Q: MolGraph + ?Sized,
        T: MolGraph + ?Sized,
    {
        McsSearch {
            query: GraphIndex::build(query),
            target: GraphIndex::build(target),
            chem,
            opts,
        }
    }

    /// Run the search under a fresh `timeout_ms` budget.
    ///
    /// Candidates are the pipeline result for the requested mode plus, in
    /// induced mode, the edge-preserving one (every extension step checks
    /// absent bonds too, so it is induced-consistent). Under relaxed bond
    /// orders the strict-order results join as a reference, and a candidate
    /// is only eligible when it maps at least as many bonds as the best of
    /// them. Among eligible candidates the one with the most atoms wins,
    /// then the one with the most bonds, then the earliest.
    pub fn run(&self) -> SearchOutcome<AtomMapping> {
        info!(
            "mcs search: {} query atoms, {} target atoms, induced={}, connected_only={}, timeout {} ms",
            self.query.atom_count(),
            self.target.atom_count(),
            self.opts.induced,
            self.opts.connected_only,
            self.opts.timeout_ms
        );
        let budget = TimeBudget::from_millis(self.opts.timeout_ms);

        let mut candidates = self.candidates_in_mode(self.chem, self.opts.induced, &budget);
        let mut bond_floor = 0;
        if self.chem.match_bond_order != BondOrderMode::Strict {
            let strict = ChemOptions {
                match_bond_order: BondOrderMode::Strict,
                ..self.chem.clone()
            };
            let reference = self.candidates_in_mode(&strict, true, &budget);
            bond_floor = reference
                .iter()
                .map(|outcome| self.bond_count(&outcome.value))
                .max()
                .unwrap_or(0);
            candidates.extend(reference);
        }

        let timed_out = candidates.iter().any(|outcome| outcome.timed_out);
        let mut best = AtomMapping::new();
        let mut best_key = (0, 0);
        for outcome in candidates {
            let key = (outcome.value.len(), self.bond_count(&outcome.value));
            if key.1 >= bond_floor && key > best_key {
                best_key = key;
                best = outcome.value;
            }
        }

        info!(
            "mcs search mapped {} atoms, {} bonds{}",
            best_key.0,
            best_key.1,
            if timed_out { " (timed out)" } else { "" }
        );
        SearchOutcome {
            value: best,
            timed_out,
        }
    }

    /// The pipeline in the given mode, followed by the edge-preserving run
    /// when `induced` is set. Both share one product graph.
    fn candidates_in_mode(
        &self,
        chem: &ChemOptions,
        induced: bool,
        budget: &TimeBudget,
    ) -> Vec<SearchOutcome<AtomMapping>> {
        let Ok(product) = ProductGraph::build(&self.query, &self.target, chem, budget) else {
            debug!("timed out while building the product graph");
            return vec![SearchOutcome::cut_short(AtomMapping::new())];
        };
        debug!(
            "product graph ({:?} bond order): {} nodes, {} induced edges, {} bonded edges",
            chem.match_bond_order,
            product.len(),
            product.edge_count(true),
            product.edge_count(false)
        );

        if induced {
            vec![
                self.pipeline(&product, chem, true, budget),
                self.pipeline(&product, chem, false, budget),
            ]
        } else {
            vec![self.pipeline(&product, chem, false, budget)]
        }
    }

    fn pipeline(
        &self,
        product: &ProductGraph,
        chem: &ChemOptions,
        induced: bool,
        budget: &TimeBudget,
    ) -> SearchOutcome<AtomMapping> {
        let clique = max_clique(product.adjacency(induced), budget);
        let mut timed_out = clique.timed_out;
        let mut mapping: AtomMapping = clique.value.iter().map(|node| product.node(node)).collect();

        if self.opts.connected_only {
            mapping = largest_component(&self.query, &mapping);
        }

        if chem.match_bond_order != BondOrderMode::Strict || self.opts.extend {
            let grown = GreedyExtension::new(&self.query, &self.target, chem).extend(
                &mapping,
                budget,
                self.opts.extension_budget_ms,
            );
            timed_out |= grown.timed_out;
            mapping = grown.value;

            if self.opts.connected_only {
                mapping = largest_component(&self.query, &mapping);
            }
        }

        debug!("pipeline (induced={induced}) mapped {} atoms", mapping.len());
        SearchOutcome {
            value: mapping,
            timed_out,
        }
    }

    fn bond_count(&self, mapping: &AtomMapping) -> usize {
        mapping.mapped_bond_count(&self.query, &self.target)
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use molmatch_common::{
        BENZENE, CIS_2_BUTENE, CYCLOHEXANE, ETHANE, HEXANE, Molecule, NAPHTHALENE, PHENOL, PROPANE,
        TOLUENE, TRANS_2_BUTENE,
    };

    use super::*;

    fn fixtures() -> Vec<&'static Molecule> {
        vec![
            &*ETHANE,
            &*PROPANE,
            &*CYCLOHEXANE,
            &*BENZENE,
            &*TOLUENE,
            &*PHENOL,
            &*TRANS_2_BUTENE,
            &*CIS_2_BUTENE,
        ]
    }

    fn strict_order() -> ChemOptions {
        ChemOptions::builder()
            .match_bond_order(BondOrderMode::Strict)
            .build()
    }

    #[test]
    fn induced_is_never_smaller_than_edge_preserving() {
        for (chem, connected_only) in iproduct!([ChemOptions::default(), strict_order()], [true, false]) {
            let induced = McsOptions::default().connected_only(connected_only);
            let bonded = induced.clone().induced(false);
            for (q, t) in iproduct!(fixtures(), fixtures()) {
                let a = McsSearch::new(q, t, &chem, &induced).run().value;
                let b = McsSearch::new(q, t, &chem, &bonded).run().value;
                assert!(
                    a.len() >= b.len(),
                    "{} / {} ({:?}): induced {} < edge-preserving {}",
                    q.name(),
                    t.name(),
                    chem.match_bond_order,
                    a.len(),
                    b.len()
                );
            }
        }
    }

    #[test]
    fn relaxed_bond_order_never_maps_fewer_bonds() {
        let strict = strict_order();
        for (mode, induced, connected_only) in
            iproduct!([BondOrderMode::Loose, BondOrderMode::Any], [true, false], [true, false])
        {
            let relaxed = ChemOptions::builder().match_bond_order(mode).build();
            let opts = McsOptions::default()
                .induced(induced)
                .connected_only(connected_only);
            for (q, t) in iproduct!(fixtures(), fixtures()) {
                let s = McsSearch::new(q, t, &strict, &opts).run().value;
                let r = McsSearch::new(q, t, &relaxed, &opts).run().value;
                assert!(
                    r.mapped_bond_count(q, t) >= s.mapped_bond_count(q, t),
                    "{} / {} ({mode:?}, induced={induced}, connected_only={connected_only})",
                    q.name(),
                    t.name()
                );
            }
        }
    }

    #[test]
    fn relaxed_result_is_consistent_with_both_graphs() {
        let chem = ChemOptions::default();
        let opts = McsOptions::default().connected_only(false);
        let mapping = McsSearch::new(&*TOLUENE, &*NAPHTHALENE, &chem, &opts).run().value;
        assert!(mapping.is_injective());
        let pairs: Vec<(usize, usize)> = mapping.iter().collect();
        for (&(qa, ta), &(qb, tb)) in iproduct!(&pairs, &pairs) {
            if qa < qb {
                assert_eq!(
                    TOLUENE.bond_between(qa, qb).is_some(),
                    NAPHTHALENE.bond_between(ta, tb).is_some()
                );
            }
        }
    }

    #[test]
    fn benzene_in_naphthalene() {
        let chem = ChemOptions::default();
        let opts = McsOptions::default();
        let outcome = McsSearch::new(&*BENZENE, &*NAPHTHALENE, &chem, &opts).run();
        assert!(!outcome.timed_out);
        assert_eq!(outcome.value.len(), 6);
        assert_eq!(outcome.value.mapped_bond_count(&*BENZENE, &*NAPHTHALENE), 6);
    }

    #[test]
    fn heteroatom_is_left_out() {
        let chem = ChemOptions::default();
        let opts = McsOptions::default();
        let mapping = McsSearch::new(&*PHENOL, &*TOLUENE, &chem, &opts).run().value;
        assert_eq!(mapping.len(), 6);
        assert!(!mapping.contains_query(6));
    }

    #[test]
    fn ring_only_blocks_chains() {
        let chem = ChemOptions::builder().ring_matches_ring_only(true).build();
        let opts = McsOptions::default();
        let outcome = McsSearch::new(&*CYCLOHEXANE, &*HEXANE, &chem, &opts).run();
        assert!(outcome.value.is_empty());
        assert!(!outcome.timed_out);
    }

    #[test]
    fn ring_onto_chain_without_ring_policy() {
        // Induced: five ring atoms form a path that fits the chain.
        let chem = ChemOptions::default();
        let opts = McsOptions::default();
        let mapping = McsSearch::new(&*CYCLOHEXANE, &*HEXANE, &chem, &opts).run().value;
        assert_eq!(mapping.len(), 5);
    }

    #[test]
    fn zero_timeout_is_not_an_error() {
        let chem = ChemOptions::default();
        let opts = McsOptions::default().timeout_ms(0);
        let outcome = McsSearch::new(&*BENZENE, &*NAPHTHALENE, &chem, &opts).run();
        assert!(outcome.timed_out);
        assert!(outcome.value.is_empty());
    }
}
