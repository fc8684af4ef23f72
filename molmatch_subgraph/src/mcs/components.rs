//! Restrict a mapping to its largest connected fragment on the query side.

use molmatch_common::MolGraph;
use tracing::debug;

use crate::mapping::AtomMapping;

/// Union-find with path halving and union by size.
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// The sub-mapping over the largest connected component of the mapped query
/// atoms, using query bonds only.
///
/// Components are ranked by size; on a tie the component containing the
/// lowest mapped query index wins.
pub fn largest_component<G: MolGraph + ?Sized>(query: &G, mapping: &AtomMapping) -> AtomMapping {
    let Some(max_key) = mapping.query_indices().max() else {
        return AtomMapping::new();
    };

    let mut sets = DisjointSet::new(query.atom_count().max(max_key + 1));
    for k in 0..query.bond_count() {
        let bond = query.bond(k);
        if mapping.contains_query(bond.begin) && mapping.contains_query(bond.end) {
            sets.union(bond.begin, bond.end);
        }
    }

    // Roots in order of first appearance, with their mapped member counts.
    let mut roots: Vec<(usize, usize)> = Vec::new();
    for q in mapping.query_indices() {
        let root = sets.find(q);
        match roots.iter_mut().find(|(r, _)| *r == root) {
            Some((_, count)) => *count += 1,
            None => roots.push((root, 1)),
        }
    }

    let mut best = roots[0];
    for &(root, count) in &roots[1..] {
        if count > best.1 {
            best = (root, count);
        }
    }

    if roots.len() > 1 {
        debug!(
            "mapping has {} fragments, keeping {} of {} atoms",
            roots.len(),
            best.1,
            mapping.len()
        );
    }

    mapping
        .iter()
        .filter(|&(q, _)| sets.find(q) == best.0)
        .collect()
}
