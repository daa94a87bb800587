//! Clustering history: the append-only object store and merge-event log.
//!
//! The engine is written against the [`ClusterHistory`] trait so it can be
//! tested in isolation from any concrete bookkeeping machinery;
//! [`EventHistory`] is the in-memory implementation shipped with the crate.

use serde::{Deserialize, Serialize};

use crate::kinematics::PseudoJet;

/// One recorded merge decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MergeStep {
    /// Two objects combined into a new composite.
    Pairwise {
        /// Index of the first consumed object.
        parent_a: usize,
        /// Index of the second consumed object.
        parent_b: usize,
        /// Distance at which the merge happened.
        dist: f64,
        /// Index of the created composite.
        child: usize,
    },
    /// An object terminated into the beam; no new object is created.
    Beam {
        /// Index of the consumed object.
        jet: usize,
        /// Distance at which the merge happened.
        dist: f64,
    },
}

/// The bookkeeping service the engine drives.
///
/// The object sequence is append-only and indexed by creation order: the
/// initial inputs first, then every composite in the order it was created.
pub trait ClusterHistory {
    /// All objects created so far, creation-ordered.
    fn jets(&self) -> &[PseudoJet];

    /// Record a pairwise recombination; appends `combined` and returns its
    /// index.
    fn record_pairwise(&mut self, a: usize, b: usize, dist: f64, combined: PseudoJet) -> usize;

    /// Record a beam recombination of the object at `idx`.
    fn record_beam(&mut self, idx: usize, dist: f64);
}

/// In-memory clustering history for a single event.
///
/// # Example
///
/// ```
/// use flavorjet_core::cluster::{ClusterHistory, EventHistory};
/// use flavorjet_core::kinematics::PseudoJet;
///
/// let mut history = EventHistory::new(vec![
///     PseudoJet::new(10.0, 0.0, 0.0, 10.0, 21),
/// ]);
/// history.record_beam(0, 100.0);
/// assert_eq!(history.inclusive_jets().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventHistory {
    jets: Vec<PseudoJet>,
    n_initial: usize,
    steps: Vec<MergeStep>,
}

impl EventHistory {
    /// Create a history seeded with the initial particles, in input order.
    pub fn new(particles: Vec<PseudoJet>) -> Self {
        let n_initial = particles.len();
        Self {
            jets: particles,
            n_initial,
            steps: Vec::new(),
        }
    }

    /// Number of initial (input) particles.
    pub fn n_initial(&self) -> usize {
        self.n_initial
    }

    /// The ordered merge-event log.
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// The jets that terminated into the beam, in beam-merge order.
    ///
    /// After a completed run these are the final jets of the event: every
    /// object is consumed exactly once, and the beam path is the only one
    /// that retires an object without a successor.
    pub fn inclusive_jets(&self) -> Vec<PseudoJet> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                MergeStep::Beam { jet, .. } => Some(self.jets[*jet]),
                MergeStep::Pairwise { .. } => None,
            })
            .collect()
    }
}

impl ClusterHistory for EventHistory {
    fn jets(&self) -> &[PseudoJet] {
        &self.jets
    }

    fn record_pairwise(&mut self, a: usize, b: usize, dist: f64, combined: PseudoJet) -> usize {
        self.jets.push(combined);
        let child = self.jets.len() - 1;
        self.steps.push(MergeStep::Pairwise {
            parent_a: a,
            parent_b: b,
            dist,
            child,
        });
        child
    }

    fn record_beam(&mut self, idx: usize, dist: f64) {
        self.steps.push(MergeStep::Beam { jet: idx, dist });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jet(px: f64, py: f64, label: i32) -> PseudoJet {
        PseudoJet::new(px, py, 0.0, (px * px + py * py).sqrt(), label)
    }

    #[test]
    fn test_indices_are_creation_ordered() {
        let mut history = EventHistory::new(vec![jet(1.0, 0.0, 3), jet(0.0, 1.0, 21)]);
        assert_eq!(history.n_initial(), 2);

        let combined = history.jets()[0].recombined(&history.jets()[1], 3);
        let child = history.record_pairwise(0, 1, 0.5, combined);
        assert_eq!(child, 2, "composites append after all existing objects");

        let next = history.record_pairwise(2, 0, 0.7, combined);
        assert_eq!(next, 3, "indices strictly increase in creation order");
        assert_eq!(history.jets().len(), 4);

        println!("[PASS] test_indices_are_creation_ordered");
    }

    #[test]
    fn test_inclusive_jets_are_beam_merged_only() {
        let mut history = EventHistory::new(vec![jet(1.0, 0.0, 3), jet(0.0, 1.0, -3)]);

        let combined = history.jets()[0].recombined(&history.jets()[1], 21);
        let child = history.record_pairwise(0, 1, 0.5, combined);
        history.record_beam(child, 2.0);

        let jets = history.inclusive_jets();
        assert_eq!(jets.len(), 1);
        assert_eq!(jets[0].label(), 21);
        assert_eq!(history.steps().len(), 2);

        println!("[PASS] test_inclusive_jets_are_beam_merged_only");
    }

    #[test]
    fn test_merge_step_serde_roundtrip() {
        let steps = vec![
            MergeStep::Pairwise {
                parent_a: 0,
                parent_b: 1,
                dist: 0.25,
                child: 2,
            },
            MergeStep::Beam { jet: 2, dist: 4.0 },
        ];
        let json = serde_json::to_string(&steps).expect("serialize");
        let restored: Vec<MergeStep> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(steps, restored);

        println!("[PASS] test_merge_step_serde_roundtrip - JSON: {json}");
    }
}
