//! Error types for flavorjet-core.
//!
//! All fallible library operations return [`ClusterResult`]. Library code
//! never panics; errors are propagated with the `?` operator and carry the
//! offending values so callers can report or escalate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors produced by measure construction, flavor combination, and the
/// clustering engine.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A configuration value failed validation.
    ///
    /// # When This Occurs
    ///
    /// - Radius not strictly positive or not finite
    /// - A finite-penalty scale that is not strictly positive
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two flavor labels were asked to combine but are not compatible.
    ///
    /// Should be unreachable when the engine runs over a flavor-filtered
    /// measure; the engine still checks defensively and either assigns the
    /// invalid-label sentinel or escalates this error, depending on
    /// configuration.
    #[error("Labels {a} and {b} cannot combine into a single flavor")]
    IncompatibleLabels {
        /// Label of the first participant
        a: i32,
        /// Label of the second participant
        b: i32,
    },

    /// A label outside the recognized set was encountered.
    ///
    /// Recognized labels: |q| in 1..=6 (quarks), 21 (gluon), 22 (photon),
    /// |l| in {11, 13} (charged leptons).
    #[error("Unrecognized flavor label: {0}")]
    InvalidLabel(i32),
}

impl ClusterError {
    /// Create an `InvalidParameter` error with a descriptive message.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an `IncompatibleLabels` error.
    pub fn incompatible_labels(a: i32, b: i32) -> Self {
        Self::IncompatibleLabels { a, b }
    }

    /// Create an `InvalidLabel` error.
    pub fn invalid_label(label: i32) -> Self {
        Self::InvalidLabel(label)
    }
}
