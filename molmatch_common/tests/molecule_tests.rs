use molmatch_common::*;
use quickcheck::{Arbitrary, Gen, quickcheck};
use rstest::rstest;

#[rstest]
#[case(&ETHANE, 2, 1)]
#[case(&PROPANE, 3, 2)]
#[case(&HEXANE, 6, 5)]
#[case(&CYCLOHEXANE, 6, 6)]
#[case(&BENZENE, 6, 6)]
#[case(&NAPHTHALENE, 10, 11)]
#[case(&BICYCLO_OCTANE, 8, 9)]
#[case(&TRANS_2_BUTENE, 4, 3)]
fn fixture_counts(#[case] mol: &Molecule, #[case] atoms: usize, #[case] bonds: usize) {
    assert_eq!(mol.atom_count(), atoms, "{}", mol.name());
    assert_eq!(mol.bond_count(), bonds, "{}", mol.name());
}

#[rstest]
#[case(&CYCLOHEXANE)]
#[case(&BENZENE)]
#[case(&NAPHTHALENE)]
#[case(&BICYCLO_OCTANE)]
#[case(&TOLUENE)]
fn ring_bonds_join_ring_atoms(#[case] mol: &Molecule) {
    for bond in mol.bonds().iter().filter(|b| b.in_ring) {
        assert!(mol.atom(bond.begin).in_ring && mol.atom(bond.end).in_ring);
    }
}

#[test]
fn butene_isomers_differ_only_in_stereo() {
    let trans = &*TRANS_2_BUTENE;
    let cis = &*CIS_2_BUTENE;
    assert_eq!(trans.atoms(), cis.atoms());
    assert_eq!(trans.bond_between(1, 2).map(|b| b.stereo), Some(BondStereo::E));
    assert_eq!(cis.bond_between(1, 2).map(|b| b.stereo), Some(BondStereo::Z));
}

/// Raw bond list over a small atom range, possibly malformed.
#[derive(Clone, Debug)]
struct RawBonds {
    atom_count: usize,
    pairs: Vec<(usize, usize)>,
}

impl Arbitrary for RawBonds {
    fn arbitrary(g: &mut Gen) -> Self {
        let atom_count = usize::arbitrary(g) % 6 + 1;
        let len = usize::arbitrary(g) % 8;
        let pairs = (0..len)
            .map(|_| (usize::arbitrary(g) % 8, usize::arbitrary(g) % 8))
            .collect();
        Self { atom_count, pairs }
    }
}

quickcheck! {
    fn prop_builder_accepts_exactly_simple_graphs(raw: RawBonds) -> bool {
        let mut b = MoleculeBuilder::new("raw");
        b.add_atoms(&Atom::carbon(), raw.atom_count);
        for &(x, y) in &raw.pairs {
            b.add_bond(Bond::new(x, y, BondOrder::Single));
        }

        let mut seen = std::collections::HashSet::new();
        let well_formed = raw.pairs.iter().all(|&(x, y)| {
            x < raw.atom_count && y < raw.atom_count && x != y && seen.insert((x.min(y), x.max(y)))
        });

        match b.build() {
            Ok(mol) => {
                well_formed
                    && (0..mol.atom_count()).map(|a| mol.degree(a)).sum::<usize>()
                        == 2 * mol.bond_count()
            }
            Err(_) => !well_formed,
        }
    }
}
