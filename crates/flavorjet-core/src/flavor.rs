//! Flavor labels: predicates, compatibility, and the combination table.
//!
//! Labels follow the PDG-id convention restricted to the species the
//! clustering rules recognize:
//!
//! - `±1..=±6` — quarks/antiquarks (sign distinguishes particle from
//!   antiparticle)
//! - `21` — gluon
//! - `22` — photon
//! - `±11`, `±13` — charged leptons
//!
//! The predicates are pure functions over the integer label with no shared
//! state. [`compatible`] gates merges; [`combine`] derives the label of the
//! composite and is defined exactly on the compatible pairs.

use crate::error::{ClusterError, ClusterResult};

/// Gluon label.
pub const GLUON: i32 = 21;

/// Photon label.
pub const PHOTON: i32 = 22;

/// Sentinel assigned to a composite whose labeling failed.
///
/// Downstream consumers can detect corruption by checking for this value;
/// it never satisfies [`is_valid_label`].
pub const INVALID_LABEL: i32 = -999;

/// True for quark or antiquark labels (|label| in 1..=6).
#[inline]
pub fn is_quark(label: i32) -> bool {
    let a = label.abs();
    (1..=6).contains(&a)
}

/// True for the gluon label.
#[inline]
pub fn is_gluon(label: i32) -> bool {
    label == GLUON
}

/// True for the photon label.
#[inline]
pub fn is_photon(label: i32) -> bool {
    label == PHOTON
}

/// True for charged lepton labels (|label| in {11, 13}).
#[inline]
pub fn is_lepton(label: i32) -> bool {
    let a = label.abs();
    a == 11 || a == 13
}

/// True when the label belongs to the recognized set.
#[inline]
pub fn is_valid_label(label: i32) -> bool {
    is_quark(label) || is_gluon(label) || is_photon(label) || is_lepton(label)
}

/// Symmetric predicate: may objects labeled `a` and `b` merge?
///
/// The allowed pairs:
/// - quark + gluon, quark + photon (either order)
/// - gluon + gluon
/// - quark + antiquark of the same flavor (`a + b == 0`)
/// - lepton + photon (either order)
pub fn compatible(a: i32, b: i32) -> bool {
    if is_quark(a) && (is_gluon(b) || is_photon(b)) {
        return true;
    }
    if (is_gluon(a) || is_photon(a)) && is_quark(b) {
        return true;
    }
    if is_gluon(a) && is_gluon(b) {
        return true;
    }
    if is_quark(a) && is_quark(b) && a + b == 0 {
        return true;
    }
    if is_lepton(a) && is_photon(b) {
        return true;
    }
    if is_photon(a) && is_lepton(b) {
        return true;
    }
    false
}

/// Combined label for a compatible pair.
///
/// Derivation, by explicit case dispatch:
/// - quark + gluon or quark + photon → the quark's label
/// - gluon + gluon → gluon
/// - quark + antiquark (`a + b == 0`) → gluon
/// - lepton + photon → the lepton's label
///
/// # Errors
///
/// Returns [`ClusterError::IncompatibleLabels`] for any pair the table does
/// not cover. A compatible pair missing here is an internal consistency
/// fault and is surfaced, never defaulted.
pub fn combine(a: i32, b: i32) -> ClusterResult<i32> {
    if is_quark(a) && (is_gluon(b) || is_photon(b)) {
        return Ok(a);
    }
    if (is_gluon(a) || is_photon(a)) && is_quark(b) {
        return Ok(b);
    }
    if is_gluon(a) && is_gluon(b) {
        return Ok(GLUON);
    }
    if is_quark(a) && is_quark(b) && a + b == 0 {
        return Ok(GLUON);
    }
    if is_lepton(a) && is_photon(b) {
        return Ok(a);
    }
    if is_photon(a) && is_lepton(b) {
        return Ok(b);
    }
    Err(ClusterError::incompatible_labels(a, b))
}
