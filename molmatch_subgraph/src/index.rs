//! Per-search structural index over a [`MolGraph`] view.
//!
//! Built once at the start of a search: sorted neighbor lists, degrees, and a
//! dense bond lookup so "is there a bond between `a` and `b`" is a single
//! array read in the hot loops.

use molmatch_common::{Atom, Bond, MolGraph};

/// Adjacency and bond lookup for one molecule, valid for one search.
#[derive(Clone, Debug)]
pub struct GraphIndex<'a> {
    atoms: Vec<&'a Atom>,
    bonds: Vec<&'a Bond>,
    /// Ascending neighbor indices per atom.
    neighbors: Vec<Vec<usize>>,
    /// `bond_matrix[a * n + b]` is the bond index joining `a` and `b`.
    bond_matrix: Vec<Option<usize>>,
}

impl<'a> GraphIndex<'a> {
    /// Index a graph view.
    ///
    /// # Panics
    ///
    /// Panics if a bond references an atom outside `0..atom_count()`; the
    /// view is malformed and continuing would mask an integration bug.
    pub fn build<G: MolGraph + ?Sized>(graph: &'a G) -> Self {
        let n = graph.atom_count();
        let atoms: Vec<&'a Atom> = (0..n).map(|i| graph.atom(i)).collect();
        let bonds: Vec<&'a Bond> = (0..graph.bond_count()).map(|k| graph.bond(k)).collect();

        let mut neighbors = vec![Vec::new(); n];
        let mut bond_matrix = vec![None; n * n];
        for (k, bond) in bonds.iter().enumerate() {
            let (a, b) = (bond.begin, bond.end);
            assert!(
                a < n && b < n,
                "malformed graph view: bond {k} joins atoms {a} and {b}, but only {n} atoms exist"
            );
            neighbors[a].push(b);
            neighbors[b].push(a);
            bond_matrix[a * n + b] = Some(k);
            bond_matrix[b * n + a] = Some(k);
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        GraphIndex {
            atoms,
            bonds,
            neighbors,
            bond_matrix,
        }
    }

    /// Number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the graph has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atom at `idx`.
    pub fn atom(&self, idx: usize) -> &'a Atom {
        self.atoms[idx]
    }

    /// Number of distinct neighbours of `idx`.
    pub fn degree(&self, idx: usize) -> usize {
        self.neighbors[idx].len()
    }

    /// Neighbours of `idx`, ascending.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.neighbors[idx]
    }

    /// All bonds in input order.
    pub fn bonds(&self) -> &[&'a Bond] {
        &self.bonds
    }

    /// The bond joining `a` and `b`, if any.
    pub fn bond(&self, a: usize, b: usize) -> Option<&'a Bond> {
        let n = self.atoms.len();
        self.bond_matrix[a * n + b].map(|k| self.bonds[k])
    }

    /// Whether `a` and `b` are bonded.
    pub fn has_bond(&self, a: usize, b: usize) -> bool {
        self.bond_matrix[a * self.atoms.len() + b].is_some()
    }
}

impl MolGraph for GraphIndex<'_> {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn atom(&self, idx: usize) -> &Atom {
        self.atoms[idx]
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn bond(&self, idx: usize) -> &Bond {
        self.bonds[idx]
    }
}
