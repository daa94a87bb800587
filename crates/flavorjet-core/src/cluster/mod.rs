//! The greedy merge scheduler and its bookkeeping collaborators.

pub mod candidate;
pub mod engine;
pub mod history;

pub use candidate::Candidate;
pub use engine::FlavorAwareClusterer;
pub use history::{ClusterHistory, EventHistory, MergeStep};
