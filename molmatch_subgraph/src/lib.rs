//! Substructure and maximum common substructure search over molecule graphs.
//!
//! The free functions below are the entry points most callers need. They
//! never fail on timeout: an exhausted budget yields the best result found
//! so far. [`SubstructureMatcher`] and [`McsSearch`] expose the same
//! searches together with a `timed_out` flag.

pub mod budget;
pub mod compat;
pub mod index;
pub mod mapping;
pub mod mcs;
pub mod vf2;

pub use crate::budget::{Expired, SearchOutcome, TimeBudget};
pub use crate::compat::{atoms_compatible, bonds_compatible, degree_admissible};
pub use crate::mapping::AtomMapping;
pub use crate::mcs::{McsSearch, ProductGraph, largest_component, max_clique};
pub use crate::vf2::SubstructureMatcher;

use molmatch_common::{ChemOptions, McsOptions, MolGraph};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Does `query` occur in `target`?
pub fn is_substructure<Q, T>(query: &Q, target: &T, opts: &ChemOptions, timeout_ms: u64) -> bool
where
    Q: MolGraph + ?Sized,
    T: MolGraph + ?Sized,
{
    SubstructureMatcher::new(query, target, opts)
        .exists(timeout_ms)
        .into_value()
}

/// Distinct embeddings of `query` in `target`, at most `max_matches` of
/// them (`0` for all).
pub fn find_all_substructures<Q, T>(
    query: &Q,
    target: &T,
    opts: &ChemOptions,
    max_matches: usize,
    timeout_ms: u64,
) -> Vec<AtomMapping>
where
    Q: MolGraph + ?Sized,
    T: MolGraph + ?Sized,
{
    SubstructureMatcher::new(query, target, opts)
        .enumerate(max_matches, timeout_ms)
        .into_value()
}

/// Maximum common substructure of `query` and `target`.
///
/// Returns an empty mapping when nothing matches or the budget ran out
/// before any pair was found.
pub fn find_mcs<Q, T>(query: &Q, target: &T, chem: &ChemOptions, opts: &McsOptions) -> AtomMapping
where
    Q: MolGraph + ?Sized,
    T: MolGraph + ?Sized,
{
    McsSearch::new(query, target, chem, opts).run().into_value()
}

/// Substructure test of one query against many targets.
///
/// Each target gets its own search and its own `timeout_ms` budget. With the
/// `rayon` feature the targets are searched in parallel.
pub fn screen_substructures<Q, T>(
    query: &Q,
    targets: &[T],
    opts: &ChemOptions,
    timeout_ms: u64,
) -> Vec<bool>
where
    Q: MolGraph + Sync + ?Sized,
    T: MolGraph + Sync,
{
    #[cfg(feature = "rayon")]
    let target_iter = targets.par_iter();

    #[cfg(not(feature = "rayon"))]
    let target_iter = targets.iter();

    target_iter
        .map(|target| is_substructure(query, target, opts, timeout_ms))
        .collect()
}
