//! Annotated molecule graphs.
//!
//! The matching engine never perceives chemistry itself: aromaticity, ring
//! membership and stereo descriptors arrive pre-computed on each [`Atom`] and
//! [`Bond`] and are trusted as-is. Anything implementing [`MolGraph`] can be
//! searched; [`Molecule`] is the owned implementation used throughout the
//! workspace.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Bond order as supplied by the structure reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Unknown,
}

impl BondOrder {
    /// Single or double, the two orders an aromatic bond may stand in for.
    #[must_use]
    pub const fn is_single_or_double(self) -> bool {
        matches!(self, Self::Single | Self::Double)
    }
}

/// Bond stereo descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondStereo {
    /// No stereo information.
    #[default]
    None,
    /// Wedge up.
    Up,
    /// Wedge down.
    Down,
    /// Double bond with E (trans) configuration.
    E,
    /// Double bond with Z (cis) configuration.
    Z,
}

/// An atom with its pre-computed annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Atomic number; `0` is a wildcard that matches any element.
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub isotope: Option<u16>,
    pub aromatic: bool,
    pub in_ring: bool,
    /// Tetrahedral parity, `None` (or `Some(0)`) when unspecified.
    pub stereo_parity: Option<i8>,
}

impl Atom {
    /// A neutral, acyclic atom of the given element.
    #[must_use]
    pub const fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            formal_charge: 0,
            isotope: None,
            aromatic: false,
            in_ring: false,
            stereo_parity: None,
        }
    }

    /// Carbon, uncharged, not aromatic.
    #[must_use]
    pub const fn carbon() -> Self {
        Self::new(6)
    }

    /// Nitrogen, uncharged, not aromatic.
    #[must_use]
    pub const fn nitrogen() -> Self {
        Self::new(7)
    }

    /// Oxygen, uncharged, not aromatic.
    #[must_use]
    pub const fn oxygen() -> Self {
        Self::new(8)
    }

    /// Wildcard atom (atomic number 0).
    #[must_use]
    pub const fn any() -> Self {
        Self::new(0)
    }

    /// Mark aromatic; aromatic atoms are ring atoms.
    #[must_use]
    pub const fn aromatic(mut self) -> Self {
        self.aromatic = true;
        self.in_ring = true;
        self
    }

    /// Mark as a ring member.
    #[must_use]
    pub const fn in_ring(mut self) -> Self {
        self.in_ring = true;
        self
    }

    /// Set the formal charge.
    #[must_use]
    pub const fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    /// Set the isotope mass number.
    #[must_use]
    pub const fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = Some(isotope);
        self
    }

    /// Set the stereo parity.
    #[must_use]
    pub const fn with_parity(mut self, parity: i8) -> Self {
        self.stereo_parity = Some(parity);
        self
    }
}

/// A bond between two atoms, identified by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub begin: usize,
    pub end: usize,
    pub order: BondOrder,
    pub aromatic: bool,
    pub in_ring: bool,
    pub stereo: BondStereo,
}

impl Bond {
    /// A plain bond of the given order.
    #[must_use]
    pub const fn new(begin: usize, end: usize, order: BondOrder) -> Self {
        Self {
            begin,
            end,
            order,
            aromatic: false,
            in_ring: false,
            stereo: BondStereo::None,
        }
    }

    /// Mark aromatic; aromatic bonds are ring bonds.
    #[must_use]
    pub const fn aromatic(mut self) -> Self {
        self.aromatic = true;
        self.in_ring = true;
        self
    }

    /// Mark as a ring bond.
    #[must_use]
    pub const fn in_ring(mut self) -> Self {
        self.in_ring = true;
        self
    }

    /// Set the double-bond stereo label.
    #[must_use]
    pub const fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }

    /// The endpoint opposite `atom`, if `atom` is an endpoint of this bond.
    #[must_use]
    pub const fn other(&self, atom: usize) -> Option<usize> {
        if self.begin == atom {
            Some(self.end)
        } else if self.end == atom {
            Some(self.begin)
        } else {
            None
        }
    }
}

/// Read-only graph view consumed by the matching engine.
///
/// Atom indices are the stable range `0..atom_count()`; every bond's
/// endpoints must fall inside it.
pub trait MolGraph {
    fn atom_count(&self) -> usize;
    fn atom(&self, idx: usize) -> &Atom;
    fn bond_count(&self) -> usize;
    fn bond(&self, idx: usize) -> &Bond;
}

/// An owned molecule graph with validated bonds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// `adjacency[atom] = [(neighbor, bond_idx), ..]`
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Assemble a molecule from raw parts, rejecting malformed bond lists.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] when a bond references a missing atom, loops
    /// back onto its own atom, or duplicates an earlier bond.
    pub fn from_parts(
        name: impl Into<String>,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
    ) -> Result<Self, GraphError> {
        let atom_count = atoms.len();
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(bonds.len());
        let mut adjacency = vec![Vec::new(); atom_count];

        for (idx, bond) in bonds.iter().enumerate() {
            for atom in [bond.begin, bond.end] {
                if atom >= atom_count {
                    return Err(GraphError::AtomOutOfRange {
                        bond: idx,
                        atom,
                        atom_count,
                    });
                }
            }
            if bond.begin == bond.end {
                return Err(GraphError::SelfLoop {
                    bond: idx,
                    atom: bond.begin,
                });
            }
            let key = (bond.begin.min(bond.end), bond.begin.max(bond.end));
            if !seen.insert(key) {
                return Err(GraphError::DuplicateBond {
                    bond: idx,
                    a: key.0,
                    b: key.1,
                });
            }
            adjacency[bond.begin].push((bond.end, idx));
            adjacency[bond.end].push((bond.begin, idx));
        }

        let name = name.into();
        tracing::trace!(
            "built molecule '{}': {} atoms, {} bonds",
            name,
            atom_count,
            bonds.len()
        );

        Ok(Self {
            name,
            atoms,
            bonds,
            adjacency,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Atoms in index order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Bonds in input order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of bonds at `atom`.
    #[must_use]
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Neighbor atom indices of `atom`, in bond insertion order.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[atom].iter().map(|&(n, _)| n)
    }

    /// The bond joining `a` and `b`, if any.
    #[must_use]
    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.adjacency[a]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, idx)| &self.bonds[idx])
    }
}

impl MolGraph for Molecule {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn bond(&self, idx: usize) -> &Bond {
        &self.bonds[idx]
    }
}

/// Incremental construction of a [`Molecule`].
#[derive(Debug, Clone, Default)]
pub struct MoleculeBuilder {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl MoleculeBuilder {
    /// An empty builder for a molecule called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Append `count` copies of `atom` and return their indices.
    pub fn add_atoms(&mut self, atom: &Atom, count: usize) -> Vec<usize> {
        (0..count).map(|_| self.add_atom(atom.clone())).collect()
    }

    /// Queue a bond; it is validated by [`MoleculeBuilder::build`].
    pub fn add_bond(&mut self, bond: Bond) -> &mut Self {
        self.bonds.push(bond);
        self
    }

    /// Finish construction.
    ///
    /// # Errors
    ///
    /// See [`Molecule::from_parts`].
    pub fn build(self) -> Result<Molecule, GraphError> {
        Molecule::from_parts(self.name, self.atoms, self.bonds)
    }
}
