//! Four-momentum value type used by the clustering engine.
//!
//! [`PseudoJet`] is a plain Cartesian four-momentum `(px, py, pz, E)` with a
//! flavor label attached. Distance computations never mutate their inputs;
//! recombination produces a fresh object.

use serde::{Deserialize, Serialize};

use crate::flavor::INVALID_LABEL;

/// Pseudorapidity assigned to objects with no transverse momentum.
///
/// A purely longitudinal momentum has infinite pseudorapidity; it is clamped
/// to this magnitude so that angular separations remain finite and ordered.
pub const MAX_RAP: f64 = 1e5;

/// A particle-like object: four-momentum plus flavor label.
///
/// # Example
///
/// ```
/// use flavorjet_core::kinematics::PseudoJet;
///
/// let jet = PseudoJet::new(3.0, 4.0, 0.0, 5.0, 21);
/// assert_eq!(jet.perp2(), 25.0);
/// assert_eq!(jet.label(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudoJet {
    /// x momentum component
    pub px: f64,
    /// y momentum component
    pub py: f64,
    /// z momentum component
    pub pz: f64,
    /// Energy
    pub e: f64,
    label: i32,
}

impl PseudoJet {
    /// Create a new object from Cartesian momentum components and a label.
    pub fn new(px: f64, py: f64, pz: f64, e: f64, label: i32) -> Self {
        Self {
            px,
            py,
            pz,
            e,
            label,
        }
    }

    /// Flavor label of this object.
    #[inline]
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Replace the flavor label.
    #[inline]
    pub fn set_label(&mut self, label: i32) {
        self.label = label;
    }

    /// Squared transverse momentum, `px² + py²`.
    #[inline]
    pub fn perp2(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    /// Transverse momentum.
    #[inline]
    pub fn pt(&self) -> f64 {
        self.perp2().sqrt()
    }

    /// Pseudorapidity.
    ///
    /// Clamped to `±MAX_RAP` when the transverse momentum vanishes.
    pub fn eta(&self) -> f64 {
        let pt2 = self.perp2();
        if pt2 == 0.0 {
            return if self.pz >= 0.0 { MAX_RAP } else { -MAX_RAP };
        }
        (self.pz / pt2.sqrt()).asinh()
    }

    /// Azimuthal angle in `[0, 2π)`.
    pub fn phi(&self) -> f64 {
        let phi = self.py.atan2(self.px);
        if phi < 0.0 {
            phi + 2.0 * std::f64::consts::PI
        } else {
            phi
        }
    }

    /// Angular separation `ΔR = √(Δη² + Δφ²)` to another object.
    ///
    /// Δφ is wrapped to `[0, π]`.
    pub fn delta_r(&self, other: &PseudoJet) -> f64 {
        let deta = self.eta() - other.eta();
        let mut dphi = (self.phi() - other.phi()).abs();
        if dphi > std::f64::consts::PI {
            dphi = 2.0 * std::f64::consts::PI - dphi;
        }
        (deta * deta + dphi * dphi).sqrt()
    }

    /// Four-vector sum with `other`, labeled with `label`.
    ///
    /// Inputs are untouched; the combined label is decided by the caller
    /// (normally via [`crate::flavor::combine`]).
    pub fn recombined(&self, other: &PseudoJet, label: i32) -> PseudoJet {
        PseudoJet {
            px: self.px + other.px,
            py: self.py + other.py,
            pz: self.pz + other.pz,
            e: self.e + other.e,
            label,
        }
    }

    /// Four-vector sum carrying the invalid-label sentinel.
    ///
    /// Used when kinematics are needed before a combined flavor is known.
    pub fn unlabeled_sum(&self, other: &PseudoJet) -> PseudoJet {
        self.recombined(other, INVALID_LABEL)
    }
}
