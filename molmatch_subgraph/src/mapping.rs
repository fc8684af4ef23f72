//! Mappings between query and target atoms.

use std::collections::{BTreeMap, HashSet};

use molmatch_common::MolGraph;

/// A query-index to target-index mapping returned by every search.
///
/// Iteration is in ascending query index order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtomMapping {
    pairs: BTreeMap<usize, usize>,
}

impl AtomMapping {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mapped pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Target image of query atom `q`.
    #[must_use]
    pub fn get(&self, q: usize) -> Option<usize> {
        self.pairs.get(&q).copied()
    }

    /// Whether query atom `q` has an image.
    #[must_use]
    pub fn contains_query(&self, q: usize) -> bool {
        self.pairs.contains_key(&q)
    }

    /// Map `q` to `t`, returning the previous image of `q`.
    pub fn insert(&mut self, q: usize, t: usize) -> Option<usize> {
        self.pairs.insert(q, t)
    }

    /// Pairs in ascending query order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().map(|(&q, &t)| (q, t))
    }

    /// Mapped query atoms, ascending.
    pub fn query_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.keys().copied()
    }

    /// Images in ascending query order.
    pub fn target_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.values().copied()
    }

    /// No two query atoms share a target atom.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.pairs.len());
        self.pairs.values().all(|t| seen.insert(*t))
    }

    /// Target images in query order; identifies an embedding for de-duplication.
    #[must_use]
    pub fn signature(&self) -> Vec<usize> {
        self.pairs.values().copied().collect()
    }

    /// Number of query bonds whose endpoints are both mapped onto bonded
    /// target atoms.
    pub fn mapped_bond_count<Q, T>(&self, query: &Q, target: &T) -> usize
    where
        Q: MolGraph + ?Sized,
        T: MolGraph + ?Sized,
    {
        let target_bonds: HashSet<(usize, usize)> = (0..target.bond_count())
            .map(|k| {
                let b = target.bond(k);
                (b.begin.min(b.end), b.begin.max(b.end))
            })
            .collect();

        (0..query.bond_count())
            .filter(|&k| {
                let b = query.bond(k);
                match (self.get(b.begin), self.get(b.end)) {
                    (Some(x), Some(y)) => target_bonds.contains(&(x.min(y), x.max(y))),
                    _ => false,
                }
            })
            .count()
    }

    /// The underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<usize, usize> {
        self.pairs
    }
}

impl FromIterator<(usize, usize)> for AtomMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl From<AtomMapping> for BTreeMap<usize, usize> {
    fn from(mapping: AtomMapping) -> Self {
        mapping.pairs
    }
}

/// Mutable search state: a partial injective mapping held as two arrays
/// indexed by atom id.
#[derive(Clone, Debug)]
pub(crate) struct Assignment {
    /// Query atom -> target atom
    query_to_target: Vec<Option<usize>>,
    /// Target atom -> query atom
    target_to_query: Vec<Option<usize>>,
    len: usize,
}

impl Assignment {
    #[contracts::debug_ensures(ret.len == 0)]
    pub(crate) fn new(query_atoms: usize, target_atoms: usize) -> Self {
        Self {
            query_to_target: vec![None; query_atoms],
            target_to_query: vec![None; target_atoms],
            len: 0,
        }
    }

    #[contracts::debug_requires(!self.is_query_mapped(q))]
    #[contracts::debug_requires(!self.is_target_used(t))]
    #[contracts::debug_ensures(self.image(q) == Some(t) && self.preimage(t) == Some(q))]
    pub(crate) fn assign(&mut self, q: usize, t: usize) {
        self.query_to_target[q] = Some(t);
        self.target_to_query[t] = Some(q);
        self.len += 1;
    }

    #[contracts::debug_requires(self.image(q) == Some(t))]
    #[contracts::debug_ensures(!self.is_query_mapped(q) && !self.is_target_used(t))]
    pub(crate) fn unassign(&mut self, q: usize, t: usize) {
        self.query_to_target[q] = None;
        self.target_to_query[t] = None;
        self.len -= 1;
    }

    pub(crate) fn image(&self, q: usize) -> Option<usize> {
        self.query_to_target[q]
    }

    pub(crate) fn preimage(&self, t: usize) -> Option<usize> {
        self.target_to_query[t]
    }

    pub(crate) fn is_query_mapped(&self, q: usize) -> bool {
        self.query_to_target[q].is_some()
    }

    pub(crate) fn is_target_used(&self, t: usize) -> bool {
        self.target_to_query[t].is_some()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.len == self.query_to_target.len()
    }

    /// Image slot per query atom.
    pub(crate) fn images(&self) -> &[Option<usize>] {
        &self.query_to_target
    }

    /// Mapped `(query, target)` pairs in query order.
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.query_to_target
            .iter()
            .enumerate()
            .filter_map(|(q, t)| t.map(|t| (q, t)))
    }

    pub(crate) fn to_mapping(&self) -> AtomMapping {
        self.pairs().collect()
    }

    /// Rebuild the two-array form of a public mapping.
    ///
    /// Pairs that would break injectivity or fall outside the graphs are
    /// dropped.
    pub(crate) fn from_mapping(
        mapping: &AtomMapping,
        query_atoms: usize,
        target_atoms: usize,
    ) -> Self {
        let mut assignment = Self::new(query_atoms, target_atoms);
        for (q, t) in mapping.iter() {
            if q < query_atoms && t < target_atoms && !assignment.is_target_used(t) {
                assignment.assign(q, t);
            }
        }
        assignment
    }
}
