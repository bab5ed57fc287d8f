//! Reasoning algorithms
//!
//! The CBR cycle (similarity, retrieval and voting) and the recommendation
//! lookup applied to its verdict.

pub mod cbr;
pub mod recommendation;

pub use cbr::{CbrEngine, DiagnosisOutcome};
pub use recommendation::{Recommendations, recommend};
