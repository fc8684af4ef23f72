//! Configuration for substructure and maximum common substructure searches.
//!
//! Two structures parameterize a search:
//! - [`ChemOptions`]: which atom and bond properties must agree for two
//!   atoms (or bonds) to be mapped onto each other.
//! - [`McsOptions`]: how the MCS engine treats non-edges, fragments and time.
//!
//! Both are immutable for the duration of a search and may be shared freely
//! between concurrent searches.
//!
//! Quick examples
//!
//! Default flexible profile:
//! ```ignore
//! use molmatch_common::ChemOptions;
//! let chem = ChemOptions::default();
//! ```
//!
//! Strict aromaticity but otherwise flexible:
//! ```ignore
//! use molmatch_common::{AromaticityMode, ChemOptions};
//! let chem = ChemOptions::builder()
//!     .aromaticity_mode(AromaticityMode::Strict)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How aromatic flags constrain atom compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AromaticityMode {
    /// Aromatic flags must agree.
    Strict,
    /// Aromatic flags are ignored.
    #[default]
    Flexible,
}

/// How bond orders constrain bond compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondOrderMode {
    /// Orders must be identical.
    Strict,
    /// Aromatic bonds may stand in for single or double bonds.
    #[default]
    Loose,
    /// Orders are ignored.
    Any,
}

/// Chemical compatibility rules for one search.
///
/// - `degree_slack`: a query atom of degree `dq` may map onto a target atom of
///   degree `dt` only when `dq <= dt + degree_slack`. Only the substructure
///   matcher applies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChemOptions {
    pub match_atom_type: bool,
    pub match_isotope: bool,
    pub match_formal_charge: bool,
    pub use_chirality: bool,
    pub use_bond_stereo: bool,
    pub aromaticity_mode: AromaticityMode,
    pub match_bond_order: BondOrderMode,
    pub ring_matches_ring_only: bool,
    pub degree_slack: usize,
}

impl Default for ChemOptions {
    /// The flexible profile: elements must agree, everything else is lenient.
    fn default() -> Self {
        Self {
            match_atom_type: true,
            match_isotope: false,
            match_formal_charge: false,
            use_chirality: false,
            use_bond_stereo: false,
            aromaticity_mode: AromaticityMode::Flexible,
            match_bond_order: BondOrderMode::Loose,
            ring_matches_ring_only: false,
            degree_slack: 0,
        }
    }
}

impl ChemOptions {
    /// Builder starting from the default profile.
    #[must_use]
    pub fn builder() -> ChemOptionsBuilder {
        ChemOptionsBuilder::default()
    }

    /// Every property must agree, including stereo and ring membership.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            match_atom_type: true,
            match_isotope: true,
            match_formal_charge: true,
            use_chirality: true,
            use_bond_stereo: true,
            aromaticity_mode: AromaticityMode::Strict,
            match_bond_order: BondOrderMode::Strict,
            ring_matches_ring_only: true,
            degree_slack: 0,
        }
    }

    /// The flexible profile with bond orders ignored.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            match_bond_order: BondOrderMode::Any,
            ..Self::default()
        }
    }

    /// Serialize this profile to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a profile from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `json` is not a valid profile.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fluent construction of [`ChemOptions`], starting from the flexible profile.
#[derive(Debug, Clone, Default)]
pub struct ChemOptionsBuilder {
    inner: ChemOptions,
}

impl ChemOptionsBuilder {
    /// Require equal atomic numbers.
    #[must_use]
    pub const fn match_atom_type(mut self, value: bool) -> Self {
        self.inner.match_atom_type = value;
        self
    }

    /// Require equal isotopes.
    #[must_use]
    pub const fn match_isotope(mut self, value: bool) -> Self {
        self.inner.match_isotope = value;
        self
    }

    /// Require equal formal charges.
    #[must_use]
    pub const fn match_formal_charge(mut self, value: bool) -> Self {
        self.inner.match_formal_charge = value;
        self
    }

    /// Compare atom stereo parity.
    #[must_use]
    pub const fn use_chirality(mut self, value: bool) -> Self {
        self.inner.use_chirality = value;
        self
    }

    /// Compare double-bond stereo labels.
    #[must_use]
    pub const fn use_bond_stereo(mut self, value: bool) -> Self {
        self.inner.use_bond_stereo = value;
        self
    }

    /// How aromatic flags must agree.
    #[must_use]
    pub const fn aromaticity_mode(mut self, mode: AromaticityMode) -> Self {
        self.inner.aromaticity_mode = mode;
        self
    }

    /// How bond orders must agree.
    #[must_use]
    pub const fn match_bond_order(mut self, mode: BondOrderMode) -> Self {
        self.inner.match_bond_order = mode;
        self
    }

    /// Ring atoms may only map onto ring atoms.
    #[must_use]
    pub const fn ring_matches_ring_only(mut self, value: bool) -> Self {
        self.inner.ring_matches_ring_only = value;
        self
    }

    /// Allowed degree deficit of a target atom.
    #[must_use]
    pub const fn degree_slack(mut self, slack: usize) -> Self {
        self.inner.degree_slack = slack;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> ChemOptions {
        self.inner
    }
}

/// Default local deadline for the greedy extension pass.
pub const DEFAULT_EXTENSION_BUDGET_MS: u64 = 2_000;

/// Default overall MCS deadline.
pub const DEFAULT_MCS_TIMEOUT_MS: u64 = 10_000;

/// Options for a maximum common substructure search.
///
/// - induced: `true` searches for the maximum common induced subgraph (bonds
///   and non-bonds must both correspond); `false` only connects pairs whose
///   bonds are present and compatible on both sides.
/// - connected_only: keep only the largest connected fragment (query side).
/// - extend: run the greedy extension even when bond orders are strict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct McsOptions {
    pub induced: bool,
    pub connected_only: bool,
    pub timeout_ms: u64,
    pub extend: bool,
    pub extension_budget_ms: u64,
}

impl Default for McsOptions {
    fn default() -> Self {
        Self {
            induced: true,
            connected_only: true,
            timeout_ms: DEFAULT_MCS_TIMEOUT_MS,
            extend: false,
            extension_budget_ms: DEFAULT_EXTENSION_BUDGET_MS,
        }
    }
}

impl McsOptions {
    /// Preserve absent bonds as well as present ones.
    #[must_use]
    pub const fn induced(mut self, value: bool) -> Self {
        self.induced = value;
        self
    }

    /// Keep only the largest connected fragment.
    #[must_use]
    pub const fn connected_only(mut self, value: bool) -> Self {
        self.connected_only = value;
        self
    }

    /// Overall deadline in milliseconds.
    #[must_use]
    pub const fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Run the greedy extension even under strict bond orders.
    #[must_use]
    pub const fn extend(mut self, value: bool) -> Self {
        self.extend = value;
        self
    }

    /// Local deadline of the greedy extension.
    #[must_use]
    pub const fn extension_budget_ms(mut self, ms: u64) -> Self {
        self.extension_budget_ms = ms;
        self
    }
}
