//! Compatibility (product) graph for maximum common substructure search.
//!
//! Nodes are atom-compatible `(query, target)` pairs. Two nodes are adjacent
//! when they may coexist in one mapping: they never share a query or a target
//! atom, and the bond relation between the two query atoms agrees with the
//! one between the two target atoms.

use bit_set::BitSet;
use itertools::iproduct;
use molmatch_common::ChemOptions;

use crate::budget::{Expired, TimeBudget};
use crate::compat::{atoms_compatible, bonds_compatible};
use crate::index::GraphIndex;

/// Compatible atom pairs with both adjacency relations over them.
#[derive(Clone, Debug)]
pub struct ProductGraph {
    nodes: Vec<(usize, usize)>,
    /// Both bonds present and compatible.
    edge_adjacency: Vec<BitSet>,
    /// `edge_adjacency` plus pairs where both bonds are absent.
    induced_adjacency: Vec<BitSet>,
}

impl ProductGraph {
    /// Build the product of two indexed graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Expired`] if the budget runs out while edges are being
    /// generated.
    pub fn build(
        query: &GraphIndex<'_>,
        target: &GraphIndex<'_>,
        opts: &ChemOptions,
        budget: &TimeBudget,
    ) -> Result<Self, Expired> {
        let nodes: Vec<(usize, usize)> = iproduct!(0..query.atom_count(), 0..target.atom_count())
            .filter(|&(q, t)| atoms_compatible(query.atom(q), target.atom(t), opts))
            .collect();

        let n = nodes.len();
        let mut edge_adjacency = vec![BitSet::with_capacity(n); n];
        let mut induced_adjacency = vec![BitSet::with_capacity(n); n];

        for a in 0..n {
            budget.check()?;
            let (qa, ta) = nodes[a];
            for b in (a + 1)..n {
                let (qb, tb) = nodes[b];
                if qa == qb || ta == tb {
                    continue;
                }
                match (query.bond(qa, qb), target.bond(ta, tb)) {
                    (Some(x), Some(y)) if bonds_compatible(x, y, opts) => {
                        edge_adjacency[a].insert(b);
                        edge_adjacency[b].insert(a);
                        induced_adjacency[a].insert(b);
                        induced_adjacency[b].insert(a);
                    }
                    (None, None) => {
                        induced_adjacency[a].insert(b);
                        induced_adjacency[b].insert(a);
                    }
                    _ => {}
                }
            }
        }

        Ok(ProductGraph {
            nodes,
            edge_adjacency,
            induced_adjacency,
        })
    }

    /// Number of compatible pairs.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no atom pair is compatible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The `(query, target)` pair behind node `idx`.
    pub fn node(&self, idx: usize) -> (usize, usize) {
        self.nodes[idx]
    }

    /// Neighbour sets for every node, induced or edge-preserving.
    ///
    /// Edge-preserving adjacency links two pairs only when both are bonded,
    /// so its cliques are sets of mutually bonded atoms: on a molecule
    /// without three-membered rings that is at most a single bond. Larger
    /// edge-preserving results come from the greedy extension, not from the
    /// clique itself.
    pub fn adjacency(&self, induced: bool) -> &[BitSet] {
        if induced {
            &self.induced_adjacency
        } else {
            &self.edge_adjacency
        }
    }

    /// Undirected edge count under the chosen adjacency.
    pub fn edge_count(&self, induced: bool) -> usize {
        self.adjacency(induced).iter().map(BitSet::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use molmatch_common::{BENZENE, ETHANE, HEXANE, PHENOL, PROPANE};

    use super::*;

    fn product(
        query: &molmatch_common::Molecule,
        target: &molmatch_common::Molecule,
    ) -> ProductGraph {
        let query = GraphIndex::build(query);
        let target = GraphIndex::build(target);
        ProductGraph::build(&query, &target, &ChemOptions::default(), &TimeBudget::from_millis(5_000))
            .unwrap()
    }

    #[test]
    fn nodes_are_compatible_pairs() {
        let pg = product(&PHENOL, &BENZENE);
        // The hydroxyl oxygen pairs with nothing.
        assert_eq!(pg.len(), 36);
        assert!((0..pg.len()).all(|i| pg.node(i).0 != 6));
    }

    #[test]
    fn edge_relation_by_mode() {
        let pg = product(&ETHANE, &PROPANE);
        // Nodes are (q, t) in q-major order: (0,0) (0,1) (0,2) (1,0) (1,1) (1,2).
        assert_eq!(pg.len(), 6);
        let edge = pg.adjacency(false);
        let induced = pg.adjacency(true);

        // (0,0)-(1,1): bonded on both sides.
        assert!(edge[0].contains(4) && induced[0].contains(4));
        // (0,0)-(1,2): bonded in ethane, not in propane.
        assert!(!edge[0].contains(5) && !induced[0].contains(5));
        // Same query atom or same target atom never connect.
        assert!(!induced[0].contains(1) && !induced[0].contains(3));
        assert_eq!(pg.edge_count(false), 4);
        assert_eq!(pg.edge_count(true), 4);
    }

    #[test]
    fn induced_adds_shared_non_bonds() {
        let pg = product(&PROPANE, &HEXANE);
        assert!(pg.edge_count(true) > pg.edge_count(false));
        for (a, row) in pg.adjacency(false).iter().enumerate() {
            assert!(row.is_subset(&pg.adjacency(true)[a]));
        }
    }

    #[test]
    fn edge_preserving_cliques_are_bonded_pairs() {
        let pg = product(&BENZENE, &BENZENE);
        let edge = crate::mcs::max_clique(pg.adjacency(false), &TimeBudget::from_millis(5_000));
        let induced = crate::mcs::max_clique(pg.adjacency(true), &TimeBudget::from_millis(5_000));
        assert_eq!(edge.value.len(), 2);
        assert_eq!(induced.value.len(), 6);
    }

    #[test]
    fn zero_budget_aborts() {
        let query = GraphIndex::build(&*BENZENE);
        let target = GraphIndex::build(&*BENZENE);
        let result =
            ProductGraph::build(&query, &target, &ChemOptions::default(), &TimeBudget::from_millis(0));
        assert!(matches!(result, Err(Expired)));
    }
}
