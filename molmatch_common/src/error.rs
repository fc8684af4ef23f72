//! Error types for molecule construction and configuration handling.
//!
//! None of these cross the search boundary: the engine treats timeouts as a
//! normal outcome and trusts the graph views it is handed.

use thiserror::Error;

/// Errors raised while assembling a [`crate::Molecule`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A bond references an atom index that does not exist.
    #[error("bond {bond} references atom {atom}, but the molecule has {atom_count} atoms")]
    AtomOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },

    /// A bond connects an atom to itself.
    #[error("bond {bond} is a self loop on atom {atom}")]
    SelfLoop { bond: usize, atom: usize },

    /// Two bonds connect the same pair of atoms.
    #[error("bond {bond} duplicates an existing bond between atoms {a} and {b}")]
    DuplicateBond { bond: usize, a: usize, b: usize },
}

/// Errors raised while loading or storing a configuration profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The profile could not be (de)serialized.
    #[error("invalid configuration profile: {0}")]
    Json(#[from] serde_json::Error),
}
