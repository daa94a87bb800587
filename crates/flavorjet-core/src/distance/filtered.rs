//! Flavor-filtering decorator over a [`DistanceMeasure`].
//!
//! Rewrites the pairwise distance of flavor-incompatible pairs so the
//! scheduler never (or, under the opt-in finite policy, only in adversarial
//! configurations) selects them. Beam distances are never gated by flavor.

use serde::{Deserialize, Serialize};

use crate::distance::measures::DistanceMeasure;
use crate::error::{ClusterError, ClusterResult};
use crate::flavor::compatible;
use crate::kinematics::PseudoJet;

/// How an incompatible pair is penalized.
///
/// The two policies observed in the field disagree; [`InfiniteSentinel`]
/// is canonical. [`FinitePenalty`] is theoretically still selectable when
/// every remaining alternative exceeds the penalty, which would break
/// flavor conservation — it exists only for compatibility studies and must
/// be requested explicitly.
///
/// [`InfiniteSentinel`]: FilterPolicy::InfiniteSentinel
/// [`FinitePenalty`]: FilterPolicy::FinitePenalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FilterPolicy {
    /// Incompatible pairs get `+∞`: never chosen while any finite
    /// alternative remains.
    #[default]
    InfiniteSentinel,
    /// Incompatible pairs get `scale · diB(i)`.
    FinitePenalty {
        /// Multiple of the first participant's beam distance.
        scale: f64,
    },
}

impl FilterPolicy {
    /// Get description of this policy.
    pub fn description(&self) -> &'static str {
        match self {
            FilterPolicy::InfiniteSentinel => {
                "infinite sentinel - incompatible pairs are never selected"
            }
            FilterPolicy::FinitePenalty { .. } => {
                "finite penalty - incompatible pairs scaled by beam distance"
            }
        }
    }

    /// Validate the policy.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidParameter` if a finite penalty scale is
    /// not finite and strictly positive.
    pub fn validate(&self) -> ClusterResult<()> {
        if let FilterPolicy::FinitePenalty { scale } = self {
            if !scale.is_finite() || *scale <= 0.0 {
                return Err(ClusterError::invalid_parameter(format!(
                    "finite-penalty scale must be finite and > 0, got {scale}"
                )));
            }
        }
        Ok(())
    }
}

/// Decorator composing an inner measure with the flavor compatibility gate.
///
/// `dij` is rewritten for incompatible pairs per the configured
/// [`FilterPolicy`]; `di_beam` and `r` always delegate unchanged.
///
/// # Example
///
/// ```
/// use flavorjet_core::distance::{AntiKtMeasure, DistanceMeasure, FlavorFilteredMeasure};
/// use flavorjet_core::kinematics::PseudoJet;
///
/// let measure = FlavorFilteredMeasure::new(AntiKtMeasure::new(0.4).unwrap());
/// let quark = PseudoJet::new(10.0, 0.0, 0.0, 10.0, 3);
/// let same_sign = PseudoJet::new(0.0, 10.0, 0.0, 10.0, 3);
/// assert!(measure.dij(&quark, &same_sign).is_infinite());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlavorFilteredMeasure<M: DistanceMeasure> {
    inner: M,
    policy: FilterPolicy,
}

impl<M: DistanceMeasure> FlavorFilteredMeasure<M> {
    /// Wrap `inner` with the canonical infinite-sentinel policy.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            policy: FilterPolicy::InfiniteSentinel,
        }
    }

    /// Wrap `inner` with an explicit policy.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidParameter` if the policy fails
    /// validation.
    pub fn with_policy(inner: M, policy: FilterPolicy) -> ClusterResult<Self> {
        policy.validate()?;
        Ok(Self { inner, policy })
    }

    /// The configured policy.
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// The wrapped measure.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: DistanceMeasure> DistanceMeasure for FlavorFilteredMeasure<M> {
    fn dij(&self, a: &PseudoJet, b: &PseudoJet) -> f64 {
        if compatible(a.label(), b.label()) {
            return self.inner.dij(a, b);
        }
        match self.policy {
            FilterPolicy::InfiniteSentinel => f64::INFINITY,
            FilterPolicy::FinitePenalty { scale } => scale * self.inner.di_beam(a),
        }
    }

    fn di_beam(&self, a: &PseudoJet) -> f64 {
        self.inner.di_beam(a)
    }

    fn r(&self) -> f64 {
        self.inner.r()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::measures::{AntiKtMeasure, KtMeasure};

    fn jet(pt: f64, phi: f64, label: i32) -> PseudoJet {
        PseudoJet::new(pt * phi.cos(), pt * phi.sin(), 0.0, pt, label)
    }

    #[test]
    fn test_compatible_pairs_delegate_unchanged() {
        let inner = KtMeasure::new(0.4).unwrap();
        let filtered = FlavorFilteredMeasure::new(inner);

        let q = jet(10.0, 0.0, 3);
        let g = jet(8.0, 0.3, 21);
        assert_eq!(filtered.dij(&q, &g), inner.dij(&q, &g));

        println!("[PASS] test_compatible_pairs_delegate_unchanged");
    }

    #[test]
    fn test_incompatible_pairs_get_infinite_sentinel() {
        let filtered = FlavorFilteredMeasure::new(KtMeasure::new(0.4).unwrap());

        // Same-sign quarks may not merge, however close.
        let a = jet(10.0, 0.0, 3);
        let b = jet(10.0, 0.001, 3);
        assert!(filtered.dij(&a, &b).is_infinite());

        println!("[PASS] test_incompatible_pairs_get_infinite_sentinel");
    }

    #[test]
    fn test_finite_penalty_scales_beam_distance() {
        let inner = AntiKtMeasure::new(0.4).unwrap();
        let filtered =
            FlavorFilteredMeasure::with_policy(inner, FilterPolicy::FinitePenalty { scale: 1e6 })
                .expect("valid policy");

        let a = jet(5.0, 0.0, 3);
        let b = jet(5.0, 0.1, 3);
        // diB(a) = 1/25 => penalty = 1e6 * 0.04 = 4e4, finite.
        let d = filtered.dij(&a, &b);
        assert!((d - 4.0e4).abs() < 1e-6, "expected 4e4, got {d}");
        assert!(d.is_finite());

        println!("[PASS] test_finite_penalty_scales_beam_distance");
    }

    #[test]
    fn test_beam_distance_and_radius_always_delegate() {
        let inner = AntiKtMeasure::new(0.7).unwrap();
        let filtered = FlavorFilteredMeasure::new(inner);

        let lepton = jet(5.0, 0.0, 11);
        assert_eq!(filtered.di_beam(&lepton), inner.di_beam(&lepton));
        assert_eq!(filtered.r(), 0.7);
        assert_eq!(filtered.name(), "anti-kt");

        println!("[PASS] test_beam_distance_and_radius_always_delegate");
    }

    #[test]
    fn test_policy_validation_rejects_bad_scale() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let policy = FilterPolicy::FinitePenalty { scale: bad };
            assert!(policy.validate().is_err(), "scale {bad} must be rejected");
            assert!(
                FlavorFilteredMeasure::with_policy(KtMeasure::new(0.4).unwrap(), policy).is_err()
            );
        }
        assert!(FilterPolicy::InfiniteSentinel.validate().is_ok());

        println!("[PASS] test_policy_validation_rejects_bad_scale");
    }

    #[test]
    fn test_policy_serde_roundtrip() {
        for policy in [
            FilterPolicy::InfiniteSentinel,
            FilterPolicy::FinitePenalty { scale: 1e9 },
        ] {
            let json = serde_json::to_string(&policy).expect("serialize");
            let restored: FilterPolicy = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(policy, restored);
        }
        assert_eq!(FilterPolicy::default(), FilterPolicy::InfiniteSentinel);

        println!("[PASS] test_policy_serde_roundtrip");
    }
}
