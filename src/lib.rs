//! Case-based reasoning for dengue hemorrhagic fever screening.
//!
//! A query built from a 15-symptom checklist (optionally with three
//! lab-derived flags) is compared against a case base of historical
//! patients. The most similar cases vote on the diagnosis and severity, and
//! the verdict is mapped to care recommendations. Output is advisory only.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::cbr::{
    Aggregation, CbrEngine, DiagnosisOutcome, DiagnosisVotes, RetrievalSummary, SimilarityEngine,
    SimilarityProfile, SimilarityResult,
};
pub use algorithm::recommendation::{Recommendations, recommend};
pub use collections::CaseStore;
pub use config::{CbrConfig, VotingPolicy};
pub use error::{CbrError, Result};
pub use models::{Case, Diagnosis, LabFlag, QueryCase, Severity, Symptom, Verdict};
pub use report::DiagnosisReport;
