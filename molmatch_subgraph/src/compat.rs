//! Atom and bond compatibility predicates.
//!
//! These are pure functions of two annotated atoms (or bonds) and the
//! configuration. They are evaluated in the innermost loops of every search
//! and must stay O(1).

use molmatch_common::{AromaticityMode, Atom, Bond, BondOrderMode, BondStereo, ChemOptions};

/// May query atom `q` be mapped onto target atom `t`?
///
/// Degree is not considered here; see [`degree_admissible`].
#[must_use]
pub fn atoms_compatible(q: &Atom, t: &Atom, opts: &ChemOptions) -> bool {
    if opts.match_atom_type
        && q.atomic_number != 0
        && t.atomic_number != 0
        && q.atomic_number != t.atomic_number
    {
        return false;
    }
    if opts.match_isotope && q.isotope != t.isotope {
        return false;
    }
    if opts.match_formal_charge && q.formal_charge != t.formal_charge {
        return false;
    }
    if opts.aromaticity_mode == AromaticityMode::Strict && q.aromatic != t.aromatic {
        return false;
    }
    if opts.ring_matches_ring_only && q.in_ring && !t.in_ring {
        return false;
    }
    if opts.use_chirality {
        if let (Some(qp), Some(tp)) = (q.stereo_parity, t.stereo_parity) {
            if qp != 0 && tp != 0 && qp != tp {
                return false;
            }
        }
    }
    true
}

/// May query bond `q` be mapped onto target bond `t`?
#[must_use]
pub fn bonds_compatible(q: &Bond, t: &Bond, opts: &ChemOptions) -> bool {
    if opts.use_bond_stereo
        && q.stereo != BondStereo::None
        && t.stereo != BondStereo::None
        && q.stereo != t.stereo
    {
        return false;
    }
    match opts.match_bond_order {
        BondOrderMode::Any => true,
        _ if q.order == t.order => true,
        BondOrderMode::Loose => {
            (q.aromatic && t.aromatic)
                || (q.aromatic && t.order.is_single_or_double())
                || (t.aromatic && q.order.is_single_or_double())
        }
        BondOrderMode::Strict => false,
    }
}

/// A query atom of degree `dq` fits a target atom of degree `dt` when the
/// target has at least as many connections, less `slack`.
#[must_use]
pub const fn degree_admissible(dq: usize, dt: usize, slack: usize) -> bool {
    dq <= dt.saturating_add(slack)
}
