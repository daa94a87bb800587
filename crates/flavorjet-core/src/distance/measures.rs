//! The generalized-kt distance measure family.
//!
//! Each measure is configured by a single radius `R > 0` shared read-only
//! across all evaluations. With `ΔR_ij` the angular separation between
//! objects i and j:
//!
//! | Measure | dij(i,j)                          | diB(i)   |
//! |---------|-----------------------------------|----------|
//! | kt      | min(pt_i², pt_j²) · (ΔR_ij/R)²    | pt_i²    |
//! | anti-kt | (ΔR_ij/R)² / max(pt_i², pt_j²)    | 1/pt_i²  |
//! | C/A     | (ΔR_ij/R)²                        | 1        |
//!
//! Zero transverse momentum is not special-cased: the anti-kt reciprocals
//! produce IEEE infinities, which the scheduler orders correctly (an
//! infinitely soft object merges immediately in the kt sense, last in dij
//! ordering).

use crate::error::{ClusterError, ClusterResult};
use crate::kinematics::PseudoJet;

/// A pairwise/beam distance measure parametrized by a radius.
///
/// Implementations are immutable after construction and safe to share
/// read-only across independent clustering runs.
pub trait DistanceMeasure {
    /// Pairwise distance between two objects.
    fn dij(&self, a: &PseudoJet, b: &PseudoJet) -> f64;

    /// Distance between an object and the beam.
    fn di_beam(&self, a: &PseudoJet) -> f64;

    /// The configured radius.
    fn r(&self) -> f64;

    /// Short human-readable name of the measure.
    fn name(&self) -> &'static str;
}

fn validate_radius(r: f64) -> ClusterResult<f64> {
    if !r.is_finite() || r <= 0.0 {
        return Err(ClusterError::invalid_parameter(format!(
            "radius must be finite and > 0, got {r}"
        )));
    }
    Ok(r)
}

/// The kt measure: soft objects cluster first.
#[derive(Debug, Clone, Copy)]
pub struct KtMeasure {
    r: f64,
}

impl KtMeasure {
    /// Create a kt measure with radius `r`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidParameter` unless `r` is finite and
    /// strictly positive.
    pub fn new(r: f64) -> ClusterResult<Self> {
        Ok(Self {
            r: validate_radius(r)?,
        })
    }
}

impl DistanceMeasure for KtMeasure {
    fn dij(&self, a: &PseudoJet, b: &PseudoJet) -> f64 {
        let dr_by_r = a.delta_r(b) / self.r;
        a.perp2().min(b.perp2()) * dr_by_r * dr_by_r
    }

    fn di_beam(&self, a: &PseudoJet) -> f64 {
        a.perp2()
    }

    fn r(&self) -> f64 {
        self.r
    }

    fn name(&self) -> &'static str {
        "kt"
    }
}

/// The anti-kt measure: hard objects accrete their neighborhood first.
#[derive(Debug, Clone, Copy)]
pub struct AntiKtMeasure {
    r: f64,
}

impl AntiKtMeasure {
    /// Create an anti-kt measure with radius `r`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidParameter` unless `r` is finite and
    /// strictly positive.
    pub fn new(r: f64) -> ClusterResult<Self> {
        Ok(Self {
            r: validate_radius(r)?,
        })
    }
}

impl DistanceMeasure for AntiKtMeasure {
    fn dij(&self, a: &PseudoJet, b: &PseudoJet) -> f64 {
        let dr_by_r = a.delta_r(b) / self.r;
        1.0 / a.perp2().max(b.perp2()) * dr_by_r * dr_by_r
    }

    fn di_beam(&self, a: &PseudoJet) -> f64 {
        1.0 / a.perp2()
    }

    fn r(&self) -> f64 {
        self.r
    }

    fn name(&self) -> &'static str {
        "anti-kt"
    }
}

/// The Cambridge/Aachen measure: purely angular ordering.
#[derive(Debug, Clone, Copy)]
pub struct CaMeasure {
    r: f64,
}

impl CaMeasure {
    /// Create a Cambridge/Aachen measure with radius `r`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidParameter` unless `r` is finite and
    /// strictly positive.
    pub fn new(r: f64) -> ClusterResult<Self> {
        Ok(Self {
            r: validate_radius(r)?,
        })
    }
}

impl DistanceMeasure for CaMeasure {
    fn dij(&self, a: &PseudoJet, b: &PseudoJet) -> f64 {
        let dr_by_r = a.delta_r(b) / self.r;
        dr_by_r * dr_by_r
    }

    fn di_beam(&self, _a: &PseudoJet) -> f64 {
        1.0
    }

    fn r(&self) -> f64 {
        self.r
    }

    fn name(&self) -> &'static str {
        "cambridge-aachen"
    }
}
