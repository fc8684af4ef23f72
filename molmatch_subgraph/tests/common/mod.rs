#![allow(dead_code)]

use std::sync::OnceLock;

use molmatch_common::{Atom, Bond, BondOrder, Molecule, MoleculeBuilder};
use quickcheck::{Arbitrary, Gen};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A small random labelled molecule: up to `MAX_ATOMS` atoms drawn from
/// C, N and O, some of them aromatic or in a ring, and a random simple bond
/// set. Bonds between two aromatic atoms are aromatic half of the time; the
/// rest are single or double.
#[derive(Clone, Debug)]
pub struct SmallMol(pub Molecule);

const MAX_ATOMS: usize = 7;

impl Arbitrary for SmallMol {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % MAX_ATOMS + 1;
        let mut builder = MoleculeBuilder::new("random");
        let mut aromatic = Vec::with_capacity(n);
        for _ in 0..n {
            let mut atom = match u8::arbitrary(g) % 4 {
                0 => Atom::nitrogen(),
                1 => Atom::oxygen(),
                _ => Atom::carbon(),
            };
            match u8::arbitrary(g) % 3 {
                0 => atom = atom.aromatic(),
                1 => atom = atom.in_ring(),
                _ => {}
            }
            aromatic.push(atom.aromatic);
            let _ = builder.add_atom(atom);
        }

        for a in 0..n {
            for b in (a + 1)..n {
                if u8::arbitrary(g) % 3 != 0 {
                    continue;
                }
                let order = if bool::arbitrary(g) {
                    BondOrder::Single
                } else {
                    BondOrder::Double
                };
                let bond = Bond::new(a, b, order);
                if aromatic[a] && aromatic[b] && bool::arbitrary(g) {
                    builder.add_bond(bond.aromatic());
                } else {
                    builder.add_bond(bond);
                }
            }
        }

        match builder.build() {
            Ok(mol) => SmallMol(mol),
            Err(e) => panic!("generated pairs are simple: {e}"),
        }
    }
}
