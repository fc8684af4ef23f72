use molmatch_common::{BENZENE, ChemOptions, McsOptions, MolGraph, NAPHTHALENE, TOLUENE};
use molmatch_subgraph::{McsSearch, SubstructureMatcher};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let chem = ChemOptions::default();
    info!("chemistry profile: {}", chem.to_json()?);

    let opts = McsOptions::default();
    let outcome = McsSearch::new(&*BENZENE, &*NAPHTHALENE, &chem, &opts).run();
    println!(
        "MCS {} / {}: {} atoms, {} bonds{}",
        BENZENE.name(),
        NAPHTHALENE.name(),
        outcome.value.len(),
        outcome.value.mapped_bond_count(&*BENZENE, &*NAPHTHALENE),
        if outcome.timed_out { " (timed out)" } else { "" }
    );
    for (q, t) in outcome.value.iter() {
        println!("  {q} -> {t}");
    }

    let matcher = SubstructureMatcher::new(&*BENZENE, &*TOLUENE, &chem);
    let embeddings = matcher.enumerate(0, 1_000);
    println!(
        "{} occurs {} times in {} ({} atoms)",
        BENZENE.name(),
        embeddings.value.len(),
        TOLUENE.name(),
        TOLUENE.atom_count()
    );

    Ok(())
}
