//! Pairwise and beam distance measures.
//!
//! A [`DistanceMeasure`] is stateless apart from its immutable radius; the
//! three generalized-kt variants live in [`measures`], and
//! [`filtered::FlavorFilteredMeasure`] decorates any of them with the flavor
//! compatibility gate.

pub mod filtered;
pub mod measures;

pub use filtered::{FilterPolicy, FlavorFilteredMeasure};
pub use measures::{AntiKtMeasure, CaMeasure, DistanceMeasure, KtMeasure};
