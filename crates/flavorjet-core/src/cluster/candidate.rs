//! Priority-queue candidate records.

use std::cmp::Ordering;

/// A merge candidate: either a pair of object indices or one index and the
/// beam (`b == None`).
///
/// Ordered by ascending distance via `f64::total_cmp`, so `+∞` legally sorts
/// after every finite value (and NaN, should degenerate kinematics produce
/// one, after `+∞`). Ties are broken by ascending insertion sequence:
/// earlier insertion wins, which fixes a canonical merge order for identical
/// inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Distance value for this record.
    pub dist: f64,
    /// First participant index.
    pub a: usize,
    /// Second participant index, or `None` for the beam.
    pub b: Option<usize>,
    /// Insertion sequence number, the deterministic tie-break.
    pub seq: u64,
}

impl Candidate {
    /// A pairwise candidate.
    pub fn pair(dist: f64, a: usize, b: usize, seq: u64) -> Self {
        Self {
            dist,
            a,
            b: Some(b),
            seq,
        }
    }

    /// A beam candidate.
    pub fn beam(dist: f64, a: usize, seq: u64) -> Self {
        Self {
            dist,
            a,
            b: None,
            seq,
        }
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
