//! The greedy sequential-recombination scheduler.
//!
//! [`FlavorAwareClusterer`] owns the configured distance measure and drives
//! the merge loop over an injected [`ClusterHistory`]. The candidate queue
//! uses lazy deletion: records referencing already-consumed objects stay in
//! the heap and are skipped on pop, never acted upon.
//!
//! The whole computation is single-threaded and fully sequential; each merge
//! decision depends on the complete set of prior decisions. Concurrent
//! events need independent engine instances (the measure itself is immutable
//! and freely shared).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cluster::candidate::Candidate;
use crate::cluster::history::ClusterHistory;
use crate::distance::measures::DistanceMeasure;
use crate::error::ClusterResult;
use crate::flavor::{combine, INVALID_LABEL};

/// Min-heap of merge candidates.
type CandidateQueue = BinaryHeap<Reverse<Candidate>>;

/// Flavor-aware sequential recombination clusterer.
///
/// # Example
///
/// ```
/// use flavorjet_core::cluster::{EventHistory, FlavorAwareClusterer};
/// use flavorjet_core::distance::{AntiKtMeasure, FlavorFilteredMeasure};
/// use flavorjet_core::kinematics::PseudoJet;
///
/// let measure = FlavorFilteredMeasure::new(AntiKtMeasure::new(0.4).unwrap());
/// let clusterer = FlavorAwareClusterer::new(measure);
///
/// let mut history = EventHistory::new(vec![
///     PseudoJet::new(10.0, 0.0, 0.0, 10.0, 3),
///     PseudoJet::new(9.9, 0.5, 0.0, 9.91, -3),
/// ]);
/// clusterer.run(&mut history).unwrap();
/// assert!(!history.inclusive_jets().is_empty());
/// ```
pub struct FlavorAwareClusterer {
    measure: Box<dyn DistanceMeasure>,
    strict_labels: bool,
}

impl FlavorAwareClusterer {
    /// Create a clusterer driven by `measure`.
    ///
    /// Pass a [`crate::distance::FlavorFilteredMeasure`] to enforce flavor
    /// conservation; a bare measure clusters on geometry alone, with the
    /// engine's defensive label check as the only flavor guard.
    pub fn new(measure: impl DistanceMeasure + 'static) -> Self {
        Self {
            measure: Box::new(measure),
            strict_labels: false,
        }
    }

    /// Escalate labeling faults instead of assigning the invalid sentinel.
    ///
    /// When enabled, `run` returns `ClusterError::IncompatibleLabels` on the
    /// first pairwise merge whose participants cannot combine; otherwise the
    /// composite is labeled [`INVALID_LABEL`], the fault is logged, and the
    /// run continues.
    #[must_use]
    pub fn with_strict_labels(mut self, strict: bool) -> Self {
        self.strict_labels = strict;
        self
    }

    /// Human-readable description of the configured algorithm.
    pub fn description(&self) -> String {
        format!(
            "flavor-aware sequential recombination, {} measure, R = {}",
            self.measure.name(),
            self.measure.r()
        )
    }

    /// The configured radius.
    pub fn r(&self) -> f64 {
        self.measure.r()
    }

    /// Cluster the event held by `history` to completion.
    ///
    /// Seeds one pairwise candidate per unordered pair of initial objects
    /// plus one beam candidate per object (O(N²), accepted by design), then
    /// repeatedly retires the globally closest still-active candidate until
    /// none remain. Every object, input or composite, is consumed exactly
    /// once by either merge path, so the loop terminates.
    ///
    /// # Errors
    ///
    /// Only with strict labels enabled: the first labeling fault aborts the
    /// run (the history keeps the steps recorded up to that point).
    pub fn run(&self, history: &mut dyn ClusterHistory) -> ClusterResult<()> {
        let n = history.jets().len();
        let mut merged: Vec<bool> = Vec::with_capacity(n);
        let mut queue = CandidateQueue::new();
        let mut seq: u64 = 0;

        for idx in 0..n {
            self.insert(&*history, &mut queue, &mut merged, &mut seq, idx);
        }

        tracing::debug!(
            particles = n,
            candidates = queue.len(),
            measure = self.measure.name(),
            r = self.measure.r(),
            "seeded candidate queue"
        );

        while let Some(Reverse(candidate)) = queue.pop() {
            // Lazy deletion: first participant already consumed.
            if merged[candidate.a] {
                continue;
            }

            let Some(b) = candidate.b else {
                self.merge_to_beam(history, &mut merged, &candidate);
                continue;
            };

            // Lazy deletion: second participant already consumed.
            if merged[b] {
                continue;
            }

            self.merge_pair(history, &mut queue, &mut merged, &mut seq, &candidate, b)?;
        }

        Ok(())
    }

    /// Push all candidates involving the object at `idx` and give it a fresh
    /// merged flag.
    ///
    /// Pairs are only formed with earlier, still-active objects; the object
    /// always gets one beam candidate. Linear in the number of active
    /// objects.
    fn insert(
        &self,
        history: &dyn ClusterHistory,
        queue: &mut CandidateQueue,
        merged: &mut Vec<bool>,
        seq: &mut u64,
        idx: usize,
    ) {
        let jets = history.jets();
        let ijet = &jets[idx];

        for (jdx, jjet) in jets.iter().enumerate().take(idx) {
            if merged[jdx] {
                continue;
            }
            let dist = self.measure.dij(ijet, jjet);
            queue.push(Reverse(Candidate::pair(dist, idx, jdx, *seq)));
            *seq += 1;
        }

        let beam_dist = self.measure.di_beam(ijet);
        queue.push(Reverse(Candidate::beam(beam_dist, idx, *seq)));
        *seq += 1;

        merged.push(false);
    }

    /// Retire an object into the beam.
    fn merge_to_beam(
        &self,
        history: &mut dyn ClusterHistory,
        merged: &mut [bool],
        candidate: &Candidate,
    ) {
        merged[candidate.a] = true;
        history.record_beam(candidate.a, candidate.dist);
    }

    /// Combine two objects into a fresh composite and reseed it.
    ///
    /// Compatibility is re-checked here even though a filtered measure makes
    /// an incompatible selection unreachable; a fault gets the invalid-label
    /// sentinel (or aborts the run under strict labels) rather than a
    /// silently guessed flavor.
    fn merge_pair(
        &self,
        history: &mut dyn ClusterHistory,
        queue: &mut CandidateQueue,
        merged: &mut Vec<bool>,
        seq: &mut u64,
        candidate: &Candidate,
        b: usize,
    ) -> ClusterResult<()> {
        merged[candidate.a] = true;
        merged[b] = true;

        let jets = history.jets();
        let pa = jets[candidate.a];
        let pb = jets[b];

        let label = match combine(pa.label(), pb.label()) {
            Ok(label) => label,
            Err(err) => {
                tracing::error!(
                    index_a = candidate.a,
                    index_b = b,
                    label_a = pa.label(),
                    label_b = pb.label(),
                    dist = candidate.dist,
                    "selected pair cannot combine flavors; composite gets the invalid sentinel"
                );
                if self.strict_labels {
                    return Err(err);
                }
                INVALID_LABEL
            }
        };

        let combined = pa.recombined(&pb, label);
        let child = history.record_pairwise(candidate.a, b, candidate.dist, combined);
        self.insert(&*history, queue, merged, seq, child);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::history::{EventHistory, MergeStep};
    use crate::distance::{AntiKtMeasure, CaMeasure, FlavorFilteredMeasure, KtMeasure};
    use crate::flavor::GLUON;
    use crate::kinematics::PseudoJet;

    /// A central jet of transverse momentum `pt` at azimuth `phi`.
    fn jet(pt: f64, phi: f64, label: i32) -> PseudoJet {
        PseudoJet::new(pt * phi.cos(), pt * phi.sin(), 0.0, pt, label)
    }

    fn filtered_akt(r: f64) -> FlavorAwareClusterer {
        FlavorAwareClusterer::new(FlavorFilteredMeasure::new(AntiKtMeasure::new(r).unwrap()))
    }

    /// Every object index must be consumed exactly once across both paths.
    fn assert_each_object_consumed_once(history: &EventHistory) {
        let total = history.jets().len();
        let mut consumed = vec![0usize; total];
        for step in history.steps() {
            match *step {
                MergeStep::Pairwise {
                    parent_a, parent_b, ..
                } => {
                    consumed[parent_a] += 1;
                    consumed[parent_b] += 1;
                }
                MergeStep::Beam { jet, .. } => consumed[jet] += 1,
            }
        }
        for (idx, &count) in consumed.iter().enumerate() {
            assert_eq!(count, 1, "object {idx} consumed {count} times, expected 1");
        }
    }

    // =========================================================================
    // TERMINATION / CONSUMPTION
    // =========================================================================

    #[test]
    fn test_run_consumes_every_object_exactly_once() {
        let clusterer = filtered_akt(0.4);
        let mut history = EventHistory::new(vec![
            jet(50.0, 0.0, 3),
            jet(45.0, 0.1, 21),
            jet(40.0, 3.0, -3),
            jet(5.0, 3.1, 21),
            jet(2.0, 1.5, 22),
            jet(30.0, 1.55, 11),
        ]);

        clusterer.run(&mut history).expect("run must succeed");
        assert_each_object_consumed_once(&history);

        // Final active count is zero: composites are consumed too.
        let beam_count = history
            .steps()
            .iter()
            .filter(|s| matches!(s, MergeStep::Beam { .. }))
            .count();
        let pair_count = history.steps().len() - beam_count;
        assert_eq!(
            history.jets().len(),
            history.n_initial() + pair_count,
            "one appended object per pairwise merge"
        );
        assert!(beam_count >= 1, "at least one jet must reach the beam");

        println!(
            "[PASS] test_run_consumes_every_object_exactly_once - {pair_count} pairwise, {beam_count} beam"
        );
    }

    #[test]
    fn test_single_particle_goes_to_beam_at_dib() {
        let clusterer = filtered_akt(0.4);
        let particle = jet(5.0, 0.2, 21);
        let mut history = EventHistory::new(vec![particle]);

        clusterer.run(&mut history).unwrap();

        assert_eq!(history.steps().len(), 1);
        match history.steps()[0] {
            MergeStep::Beam { jet: 0, dist } => {
                assert!((dist - 0.04).abs() < 1e-12, "anti-kt diB for pt=5 is 1/25");
            }
            other => panic!("expected beam merge, got {other:?}"),
        }

        println!("[PASS] test_single_particle_goes_to_beam_at_dib");
    }

    #[test]
    fn test_empty_event_is_a_noop() {
        let clusterer = filtered_akt(0.4);
        let mut history = EventHistory::new(Vec::new());
        clusterer.run(&mut history).unwrap();
        assert!(history.steps().is_empty());
        assert!(history.inclusive_jets().is_empty());

        println!("[PASS] test_empty_event_is_a_noop");
    }

    // =========================================================================
    // FLAVOR BEHAVIOR
    // =========================================================================

    #[test]
    fn test_quark_antiquark_pair_merges_to_gluon() {
        // +3/-3 close together, everything else far away: the pair is the
        // globally closest compatible candidate under kt.
        let clusterer =
            FlavorAwareClusterer::new(FlavorFilteredMeasure::new(KtMeasure::new(0.4).unwrap()));
        let mut history = EventHistory::new(vec![
            jet(20.0, 0.00, 3),
            jet(20.0, 0.05, -3),
            jet(30.0, 3.00, 21),
        ]);

        clusterer.run(&mut history).unwrap();

        let first_pair = history
            .steps()
            .iter()
            .find_map(|s| match *s {
                MergeStep::Pairwise {
                    parent_a,
                    parent_b,
                    child,
                    ..
                } => Some((parent_a, parent_b, child)),
                _ => None,
            })
            .expect("the quark pair must merge");
        let (pa, pb, child) = first_pair;
        assert_eq!((pa.min(pb), pa.max(pb)), (0, 1));
        assert_eq!(
            history.jets()[child].label(),
            GLUON,
            "annihilating quark pair labels its composite as a gluon"
        );

        println!("[PASS] test_quark_antiquark_pair_merges_to_gluon");
    }

    #[test]
    fn test_incompatible_pair_never_selected_under_infinite_sentinel() {
        // Two same-sign quarks nearly collinear; a gluon further away. The
        // geometric minimum is the forbidden pair, which the filter pushes to
        // infinity; no recorded composite may carry the invalid sentinel.
        let clusterer =
            FlavorAwareClusterer::new(FlavorFilteredMeasure::new(CaMeasure::new(0.8).unwrap()));
        let mut history = EventHistory::new(vec![
            jet(10.0, 0.00, 3),
            jet(10.0, 0.01, 3),
            jet(10.0, 0.50, 21),
        ]);

        clusterer.run(&mut history).unwrap();
        assert_each_object_consumed_once(&history);

        for step in history.steps() {
            if let MergeStep::Pairwise { child, .. } = step {
                assert_ne!(
                    history.jets()[*child].label(),
                    INVALID_LABEL,
                    "no incompatible pair may ever be selected"
                );
            }
        }

        println!("[PASS] test_incompatible_pair_never_selected_under_infinite_sentinel");
    }

    #[test]
    fn test_unfiltered_measure_hits_defensive_label_check() {
        // Without the flavor filter the engine happily selects the same-sign
        // pair on geometry, and the defensive check assigns the sentinel.
        let clusterer = FlavorAwareClusterer::new(CaMeasure::new(0.8).unwrap());
        let mut history = EventHistory::new(vec![jet(10.0, 0.00, 3), jet(10.0, 0.01, 3)]);

        clusterer.run(&mut history).expect("non-strict run continues");

        let sentinel_children: Vec<usize> = history
            .steps()
            .iter()
            .filter_map(|s| match *s {
                MergeStep::Pairwise { child, .. }
                    if history.jets()[child].label() == INVALID_LABEL =>
                {
                    Some(child)
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            sentinel_children.len(),
            1,
            "exactly one faulted composite expected"
        );
        assert_each_object_consumed_once(&history);

        println!("[PASS] test_unfiltered_measure_hits_defensive_label_check");
    }

    #[test]
    fn test_strict_labels_escalates_fault() {
        let clusterer =
            FlavorAwareClusterer::new(CaMeasure::new(0.8).unwrap()).with_strict_labels(true);
        let mut history = EventHistory::new(vec![jet(10.0, 0.00, 3), jet(10.0, 0.01, 3)]);

        let err = clusterer.run(&mut history).expect_err("strict run must abort");
        assert!(
            matches!(
                err,
                crate::error::ClusterError::IncompatibleLabels { a: 3, b: 3 }
            ),
            "unexpected error: {err:?}"
        );

        println!("[PASS] test_strict_labels_escalates_fault");
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    #[test]
    fn test_identical_inputs_give_identical_merge_sequences() {
        let particles = vec![
            jet(50.0, 0.00, 3),
            jet(48.0, 0.20, 21),
            jet(47.0, 2.90, -3),
            jet(10.0, 2.95, 21),
            jet(3.0, 1.50, 22),
            jet(12.0, 1.48, -11),
            jet(8.0, 4.50, 2),
            jet(8.0, 4.55, -2),
        ];

        let run_once = || {
            let clusterer = filtered_akt(0.4);
            let mut history = EventHistory::new(particles.clone());
            clusterer.run(&mut history).unwrap();
            history.steps().to_vec()
        };

        let first = run_once();
        let second = run_once();
        assert_eq!(first, second, "merge sequences must be bit-identical");

        println!(
            "[PASS] test_identical_inputs_give_identical_merge_sequences - {} steps",
            first.len()
        );
    }

    #[test]
    fn test_antikt_grows_around_hard_core() {
        // A hard quark with two soft gluons nearby: anti-kt accretes the
        // soft radiation onto the hard core before anything reaches the beam.
        let clusterer = filtered_akt(0.6);
        let mut history = EventHistory::new(vec![
            jet(100.0, 0.00, 3),
            jet(1.0, 0.20, 21),
            jet(0.8, 0.35, 21),
        ]);

        clusterer.run(&mut history).unwrap();

        let jets = history.inclusive_jets();
        assert_eq!(jets.len(), 1, "everything clusters into the hard jet");
        assert_eq!(jets[0].label(), 3, "quark flavor survives gluon accretion");
        assert!((jets[0].pt() - 101.0).abs() < 1.0);

        println!("[PASS] test_antikt_grows_around_hard_core");
    }

    // =========================================================================
    // DEGENERATE KINEMATICS
    // =========================================================================

    #[test]
    fn test_zero_pt_particle_completes_under_antikt() {
        // Purely longitudinal momentum: infinite anti-kt beam distance and
        // infinite-eta separations. The run must still terminate with every
        // object consumed.
        let clusterer = filtered_akt(0.4);
        let mut history = EventHistory::new(vec![
            PseudoJet::new(0.0, 0.0, 50.0, 50.0, 21),
            jet(10.0, 0.0, 3),
            jet(9.0, 0.2, 21),
        ]);

        clusterer.run(&mut history).unwrap();
        assert_each_object_consumed_once(&history);

        println!("[PASS] test_zero_pt_particle_completes_under_antikt");
    }

    // =========================================================================
    // METADATA
    // =========================================================================

    #[test]
    fn test_description_and_radius_report_configuration() {
        let clusterer = filtered_akt(0.4);
        assert_eq!(clusterer.r(), 0.4);
        let description = clusterer.description();
        assert!(description.contains("anti-kt"), "got: {description}");
        assert!(description.contains("0.4"), "got: {description}");

        println!("[PASS] test_description_and_radius_report_configuration - {description}");
    }
}
