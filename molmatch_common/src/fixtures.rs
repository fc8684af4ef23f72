//! Common test molecules and case definitions.
//!
//! The molecules are annotated by hand (ring and aromatic flags, Kekulé bond
//! orders) since the engine performs no perception of its own. The case
//! table pairs a query with a target and an expected outcome, and is shared
//! by the tests of every crate in the workspace.

use crate::config::{AromaticityMode, ChemOptions, McsOptions};
use crate::molecule::{Atom, Bond, BondOrder, BondStereo, Molecule, MoleculeBuilder};

/// Unbranched saturated carbon chain with `len` atoms.
///
/// # Panics
///
/// Never in practice: the bond list is generated in range.
#[must_use]
pub fn carbon_chain(name: &str, len: usize) -> Molecule {
    let mut b = MoleculeBuilder::new(name);
    let atoms = b.add_atoms(&Atom::carbon(), len);
    for pair in atoms.windows(2) {
        b.add_bond(Bond::new(pair[0], pair[1], BondOrder::Single));
    }
    b.build().expect("chain bonds are in range")
}

/// Monocyclic carbon ring with `len` atoms.
///
/// Aromatic rings get alternating Kekulé orders starting with a double bond.
///
/// # Panics
///
/// Never in practice: the bond list is generated in range.
#[must_use]
pub fn carbocycle(name: &str, len: usize, aromatic: bool) -> Molecule {
    let mut b = MoleculeBuilder::new(name);
    let atom = if aromatic {
        Atom::carbon().aromatic()
    } else {
        Atom::carbon().in_ring()
    };
    let atoms = b.add_atoms(&atom, len);
    for i in 0..len {
        let (a, c) = (atoms[i], atoms[(i + 1) % len]);
        let bond = if aromatic {
            let order = if i % 2 == 0 {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
            Bond::new(a, c, order).aromatic()
        } else {
            Bond::new(a, c, BondOrder::Single).in_ring()
        };
        b.add_bond(bond);
    }
    b.build().expect("ring bonds are in range")
}

/// Benzene with one extra substituent atom on ring atom 0.
fn substituted_benzene(name: &str, substituent: Atom) -> Molecule {
    let ring = carbocycle(name, 6, true);
    let mut atoms = ring.atoms().to_vec();
    let mut bonds = ring.bonds().to_vec();
    atoms.push(substituent);
    bonds.push(Bond::new(0, 6, BondOrder::Single));
    Molecule::from_parts(name, atoms, bonds).expect("substituent bond is in range")
}

/// Ethane, `CC`.
#[must_use]
pub fn ethane() -> Molecule {
    carbon_chain("ethane", 2)
}

/// Propane, `CCC`.
#[must_use]
pub fn propane() -> Molecule {
    carbon_chain("propane", 3)
}

/// Hexane, a six-carbon chain.
#[must_use]
pub fn hexane() -> Molecule {
    carbon_chain("hexane", 6)
}

/// Cyclohexane, saturated six-ring.
#[must_use]
pub fn cyclohexane() -> Molecule {
    carbocycle("cyclohexane", 6, false)
}

/// Benzene, aromatic six-ring.
#[must_use]
pub fn benzene() -> Molecule {
    carbocycle("benzene", 6, true)
}

/// Toluene, benzene with a methyl group on atom 0.
#[must_use]
pub fn toluene() -> Molecule {
    substituted_benzene("toluene", Atom::carbon())
}

/// Phenol, benzene with a hydroxyl oxygen on atom 0.
#[must_use]
pub fn phenol() -> Molecule {
    substituted_benzene("phenol", Atom::oxygen())
}

/// Naphthalene: ring fusion atoms are 8 (C4a) and 9 (C8a).
///
/// # Panics
///
/// Never in practice: the bond list is fixed and in range.
#[must_use]
pub fn naphthalene() -> Molecule {
    use BondOrder::{Double as D, Single as S};

    let mut b = MoleculeBuilder::new("naphthalene");
    b.add_atoms(&Atom::carbon().aromatic(), 10);
    for (x, y, order) in [
        (9, 0, D),
        (0, 1, S),
        (1, 2, D),
        (2, 3, S),
        (3, 8, D),
        (8, 9, S),
        (8, 4, S),
        (4, 5, D),
        (5, 6, S),
        (6, 7, D),
        (7, 9, S),
    ] {
        b.add_bond(Bond::new(x, y, order).aromatic());
    }
    b.build().expect("naphthalene bonds are in range")
}

/// Bicyclo[2.2.2]octane: bridgeheads 0 and 1 joined by three two-carbon bridges.
///
/// # Panics
///
/// Never in practice: the bond list is fixed and in range.
#[must_use]
pub fn bicyclo_octane() -> Molecule {
    let mut b = MoleculeBuilder::new("bicyclo[2.2.2]octane");
    b.add_atoms(&Atom::carbon().in_ring(), 8);
    for (x, y) in [
        (0, 2),
        (2, 3),
        (3, 1),
        (0, 4),
        (4, 5),
        (5, 1),
        (0, 6),
        (6, 7),
        (7, 1),
    ] {
        b.add_bond(Bond::new(x, y, BondOrder::Single).in_ring());
    }
    b.build().expect("bicyclooctane bonds are in range")
}

fn but_2_ene(name: &str, stereo: BondStereo) -> Molecule {
    let mut b = MoleculeBuilder::new(name);
    b.add_atoms(&Atom::carbon(), 4);
    b.add_bond(Bond::new(0, 1, BondOrder::Single))
        .add_bond(Bond::new(1, 2, BondOrder::Double).with_stereo(stereo))
        .add_bond(Bond::new(2, 3, BondOrder::Single));
    b.build().expect("butene bonds are in range")
}

/// trans-2-butene.
#[must_use]
pub fn trans_2_butene() -> Molecule {
    but_2_ene("trans-2-butene", BondStereo::E)
}

/// cis-2-butene.
#[must_use]
pub fn cis_2_butene() -> Molecule {
    but_2_ene("cis-2-butene", BondStereo::Z)
}

/// What a test case expects from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Result of the substructure existence test.
    Substructure(bool),
    /// Number of distinct substructure embeddings.
    MatchCount(usize),
    /// Size of the MCS mapping.
    McsSize(usize),
}

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// Chemical compatibility rules for the search.
    pub chem: ChemOptions,
    /// MCS options (ignored by substructure cases).
    pub mcs: McsOptions,
    /// The molecule to search for.
    pub query: &'static Molecule,
    /// The molecule to search in.
    pub target: &'static Molecule,
    pub expected: Expectation,
}

// #####################
// MOLECULES
// #####################
lazy_static::lazy_static! {
    pub static ref ETHANE: Molecule = ethane();
    pub static ref PROPANE: Molecule = propane();
    pub static ref HEXANE: Molecule = hexane();
    pub static ref CYCLOHEXANE: Molecule = cyclohexane();
    pub static ref BENZENE: Molecule = benzene();
    pub static ref TOLUENE: Molecule = toluene();
    pub static ref PHENOL: Molecule = phenol();
    pub static ref NAPHTHALENE: Molecule = naphthalene();
    pub static ref BICYCLO_OCTANE: Molecule = bicyclo_octane();
    pub static ref TRANS_2_BUTENE: Molecule = trans_2_butene();
    pub static ref CIS_2_BUTENE: Molecule = cis_2_butene();
}

// #####################
// CASES
// #####################
lazy_static::lazy_static! {
    pub static ref ALL_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "propane_in_hexane",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &PROPANE,
            target: &HEXANE,
            expected: Expectation::Substructure(true),
        },
        TestCase {
            name: "hexane_in_propane",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &HEXANE,
            target: &PROPANE,
            expected: Expectation::Substructure(false),
        },
        TestCase {
            name: "benzene_naphthalene_mcs",
            chem: ChemOptions::default(),
            mcs: McsOptions::default().induced(true).connected_only(true),
            query: &BENZENE,
            target: &NAPHTHALENE,
            expected: Expectation::McsSize(6),
        },
        TestCase {
            name: "cyclohexane_in_benzene_strict_aromaticity",
            chem: ChemOptions::builder()
                .aromaticity_mode(AromaticityMode::Strict)
                .build(),
            mcs: McsOptions::default(),
            query: &CYCLOHEXANE,
            target: &BENZENE,
            expected: Expectation::Substructure(false),
        },
        TestCase {
            name: "cyclohexane_in_benzene_flexible",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &CYCLOHEXANE,
            target: &BENZENE,
            expected: Expectation::Substructure(true),
        },
        TestCase {
            name: "ethane_in_bicyclooctane",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &ETHANE,
            target: &BICYCLO_OCTANE,
            expected: Expectation::MatchCount(18),
        },
        TestCase {
            name: "ethane_in_propane",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &ETHANE,
            target: &PROPANE,
            expected: Expectation::MatchCount(4),
        },
        TestCase {
            name: "benzene_automorphisms",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &BENZENE,
            target: &BENZENE,
            expected: Expectation::MatchCount(12),
        },
        TestCase {
            name: "benzene_in_naphthalene",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &BENZENE,
            target: &NAPHTHALENE,
            expected: Expectation::MatchCount(24),
        },
        TestCase {
            name: "trans_butene_self",
            chem: ChemOptions::builder().use_bond_stereo(false).build(),
            mcs: McsOptions::default(),
            query: &TRANS_2_BUTENE,
            target: &TRANS_2_BUTENE,
            expected: Expectation::Substructure(true),
        },
        TestCase {
            name: "trans_butene_in_cis_with_stereo",
            chem: ChemOptions::builder().use_bond_stereo(true).build(),
            mcs: McsOptions::default(),
            query: &TRANS_2_BUTENE,
            target: &CIS_2_BUTENE,
            expected: Expectation::Substructure(false),
        },
        TestCase {
            name: "ring_to_chain_ring_only",
            chem: ChemOptions::builder().ring_matches_ring_only(true).build(),
            mcs: McsOptions::default(),
            query: &CYCLOHEXANE,
            target: &HEXANE,
            expected: Expectation::McsSize(0),
        },
        TestCase {
            name: "phenol_toluene_mcs",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &PHENOL,
            target: &TOLUENE,
            expected: Expectation::McsSize(6),
        },
        TestCase {
            name: "toluene_toluene_mcs",
            chem: ChemOptions::default(),
            mcs: McsOptions::default(),
            query: &TOLUENE,
            target: &TOLUENE,
            expected: Expectation::McsSize(7),
        },
    ];
}

/// Look up a case by name.
#[must_use]
pub fn test_case(name: &str) -> Option<&'static TestCase> {
    ALL_TEST_CASES.iter().find(|tc| tc.name == name)
}
