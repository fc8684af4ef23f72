mod common;

use std::time::{Duration, Instant};

use molmatch_common::{
    ALL_TEST_CASES, AromaticityMode, BENZENE, BICYCLO_OCTANE, BondOrderMode, CIS_2_BUTENE,
    CYCLOHEXANE, ChemOptions, ETHANE, Expectation, HEXANE, McsOptions, NAPHTHALENE, PROPANE,
    TOLUENE, TRANS_2_BUTENE, TestCase, test_case,
};
use molmatch_subgraph::{
    McsSearch, SubstructureMatcher, find_all_substructures, find_mcs, is_substructure,
};
use rstest::rstest;

use common::init_test_logger;

const TIMEOUT_MS: u64 = 10_000;

fn run_case(tc: &TestCase) -> Result<(), String> {
    match tc.expected {
        Expectation::Substructure(expected) => {
            let got = is_substructure(tc.query, tc.target, &tc.chem, TIMEOUT_MS);
            if got != expected {
                return Err(format!("{}: substructure {got}, expected {expected}", tc.name));
            }
        }
        Expectation::MatchCount(expected) => {
            let found = find_all_substructures(tc.query, tc.target, &tc.chem, 0, TIMEOUT_MS);
            if found.len() != expected {
                return Err(format!(
                    "{}: {} matches, expected {expected}",
                    tc.name,
                    found.len()
                ));
            }
        }
        Expectation::McsSize(expected) => {
            let mapping = find_mcs(tc.query, tc.target, &tc.chem, &tc.mcs);
            if mapping.len() != expected {
                return Err(format!(
                    "{}: mcs of {} atoms, expected {expected}",
                    tc.name,
                    mapping.len()
                ));
            }
        }
    }
    Ok(())
}

#[rstest]
#[case("propane_in_hexane")]
#[case("hexane_in_propane")]
#[case("benzene_naphthalene_mcs")]
#[case("cyclohexane_in_benzene_strict_aromaticity")]
#[case("cyclohexane_in_benzene_flexible")]
#[case("ethane_in_bicyclooctane")]
#[case("ethane_in_propane")]
#[case("benzene_automorphisms")]
#[case("benzene_in_naphthalene")]
#[case("trans_butene_self")]
#[case("trans_butene_in_cis_with_stereo")]
#[case("ring_to_chain_ring_only")]
#[case("phenol_toluene_mcs")]
#[case("toluene_toluene_mcs")]
fn fixture_case(#[case] name: &str) {
    init_test_logger();
    let tc = test_case(name).unwrap_or_else(|| panic!("unknown case {name}"));
    run_case(tc).unwrap();
}

#[test]
fn every_fixture_case_passes() {
    init_test_logger();
    let failures: Vec<String> = ALL_TEST_CASES
        .iter()
        .filter_map(|tc| run_case(tc).err())
        .collect();
    assert!(failures.is_empty(), "failing cases: {failures:#?}");
}

#[test]
fn scenario_chain_in_longer_chain() {
    init_test_logger();
    assert!(is_substructure(&*PROPANE, &*HEXANE, &ChemOptions::default(), TIMEOUT_MS));
}

#[test]
fn scenario_benzene_naphthalene_mcs() {
    init_test_logger();
    let opts = McsOptions::default().induced(true).connected_only(true);
    let mapping = find_mcs(&*BENZENE, &*NAPHTHALENE, &ChemOptions::default(), &opts);
    assert_eq!(mapping.len(), 6);
    assert!(mapping.is_injective());
}

#[test]
fn scenario_strict_aromaticity_rejects_cyclohexane() {
    init_test_logger();
    let chem = ChemOptions::builder()
        .aromaticity_mode(AromaticityMode::Strict)
        .build();
    assert!(!is_substructure(&*CYCLOHEXANE, &*BENZENE, &chem, TIMEOUT_MS));
}

#[test]
fn scenario_ethane_in_bicyclic() {
    init_test_logger();
    let found = find_all_substructures(
        &*ETHANE,
        &*BICYCLO_OCTANE,
        &ChemOptions::default(),
        0,
        TIMEOUT_MS,
    );
    assert_eq!(found.len(), 18);

    // Every ordered bonded pair exactly once.
    let mut images: Vec<(usize, usize)> = found
        .iter()
        .map(|m| (m.get(0).unwrap(), m.get(1).unwrap()))
        .collect();
    images.sort_unstable();
    images.dedup();
    assert_eq!(images.len(), 18);
    for (a, b) in images {
        assert!(BICYCLO_OCTANE.bond_between(a, b).is_some());
    }
}

#[test]
fn scenario_butene_stereo() {
    init_test_logger();
    let ignore = ChemOptions::builder().use_bond_stereo(false).build();
    assert!(is_substructure(&*TRANS_2_BUTENE, &*TRANS_2_BUTENE, &ignore, TIMEOUT_MS));

    let enforce = ChemOptions::builder().use_bond_stereo(true).build();
    let opts = McsOptions::default();
    let with_stereo = find_mcs(&*TRANS_2_BUTENE, &*CIS_2_BUTENE, &enforce, &opts);
    let without_stereo = find_mcs(&*TRANS_2_BUTENE, &*CIS_2_BUTENE, &ignore, &opts);

    let bonds_with = with_stereo.mapped_bond_count(&*TRANS_2_BUTENE, &*CIS_2_BUTENE);
    let bonds_without = without_stereo.mapped_bond_count(&*TRANS_2_BUTENE, &*CIS_2_BUTENE);
    assert!(bonds_with <= bonds_without);
    assert_eq!(bonds_without, 3);
}

#[test]
fn scenario_ring_only_on_chain() {
    init_test_logger();
    let chem = ChemOptions::builder().ring_matches_ring_only(true).build();
    let mapping = find_mcs(&*CYCLOHEXANE, &*HEXANE, &chem, &McsOptions::default());
    assert!(mapping.is_empty());
}

#[rstest]
#[case(&CYCLOHEXANE, &BENZENE)]
#[case(&BENZENE, &NAPHTHALENE)]
#[case(&BENZENE, &TOLUENE)]
fn loose_bond_order_maps_at_least_as_many_bonds(
    #[case] query: &molmatch_common::Molecule,
    #[case] target: &molmatch_common::Molecule,
) {
    init_test_logger();
    let strict = ChemOptions::builder()
        .match_bond_order(BondOrderMode::Strict)
        .build();
    let loose = ChemOptions::default();
    let opts = McsOptions::default();

    let strict_bonds = find_mcs(query, target, &strict, &opts).mapped_bond_count(query, target);
    let loose_bonds = find_mcs(query, target, &loose, &opts).mapped_bond_count(query, target);
    assert!(loose_bonds >= strict_bonds, "{loose_bonds} < {strict_bonds}");
}

#[test]
fn tiny_timeouts_return_promptly() {
    init_test_logger();
    let chem = ChemOptions::default();
    let start = Instant::now();

    let found = SubstructureMatcher::new(&*BENZENE, &*NAPHTHALENE, &chem).enumerate(0, 1);
    assert!(found.value.iter().all(|m| m.is_injective()));

    let opts = McsOptions::default().timeout_ms(1).connected_only(false);
    let outcome = McsSearch::new(&*NAPHTHALENE, &*NAPHTHALENE, &chem, &opts).run();
    assert!(outcome.value.is_injective());

    assert!(!is_substructure(&*HEXANE, &*PROPANE, &chem, 1));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn limited_enumeration_is_a_prefix() {
    init_test_logger();
    let chem = ChemOptions::default();
    let matcher = SubstructureMatcher::new(&*ETHANE, &*BICYCLO_OCTANE, &chem);
    let full = matcher.enumerate(0, TIMEOUT_MS);
    assert!(!full.timed_out);

    let limited = matcher.enumerate(3, TIMEOUT_MS);
    assert_eq!(limited.value.len(), 3);
    assert_eq!(limited.value[..], full.value[..3]);
}
