//! Flavor-aware sequential recombination jet clustering.
//!
//! Given particle-like objects carrying a four-momentum and an integer
//! flavor label, the engine repeatedly merges the two objects (or one
//! object and the beam) with the smallest pairwise distance, producing a
//! hierarchical clustering history. Merges are gated by a flavor
//! compatibility rule and label their composites through a deterministic
//! combination table.
//!
//! # Architecture
//!
//! This crate defines:
//! - The kinematic value type ([`kinematics::PseudoJet`])
//! - Flavor predicates and the combination algebra ([`flavor`])
//! - The kt / anti-kt / Cambridge-Aachen distance measures and the
//!   flavor-filtering decorator ([`distance`])
//! - The greedy priority-queue scheduler and the history service
//!   ([`cluster`])
//! - Error types and result alias ([`error`])
//!
//! # Determinism
//!
//! For fixed input, the merge sequence is canonical: candidates are ordered
//! by ascending distance with a documented earlier-insertion-wins tie-break,
//! and the engine is single-threaded by construction.
//!
//! # Example
//!
//! ```
//! use flavorjet_core::cluster::{EventHistory, FlavorAwareClusterer};
//! use flavorjet_core::distance::{AntiKtMeasure, FlavorFilteredMeasure};
//! use flavorjet_core::kinematics::PseudoJet;
//!
//! let measure = FlavorFilteredMeasure::new(AntiKtMeasure::new(0.4).unwrap());
//! let clusterer = FlavorAwareClusterer::new(measure);
//!
//! let mut history = EventHistory::new(vec![
//!     PseudoJet::new(50.0, 0.0, 0.0, 50.0, 3),
//!     PseudoJet::new(48.0, 5.0, 0.0, 48.3, 21),
//! ]);
//! clusterer.run(&mut history).unwrap();
//! for jet in history.inclusive_jets() {
//!     println!("{} {} {}", jet.pt(), jet.eta(), jet.label());
//! }
//! ```

pub mod cluster;
pub mod distance;
pub mod error;
pub mod flavor;
pub mod kinematics;

// Re-exports for convenience
pub use cluster::{ClusterHistory, EventHistory, FlavorAwareClusterer, MergeStep};
pub use distance::{
    AntiKtMeasure, CaMeasure, DistanceMeasure, FilterPolicy, FlavorFilteredMeasure, KtMeasure,
};
pub use error::{ClusterError, ClusterResult};
pub use kinematics::PseudoJet;
