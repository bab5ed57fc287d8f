//! Domain models for the dengue case base
//!
//! This module contains the record types consumed by the reasoning core:
//! the symptom and lab-flag vocabularies, the diagnosis and severity labels,
//! and the stored and query case records.

pub mod case;
pub mod diagnosis;
pub mod symptom;
pub mod traits;

// Re-export commonly used types
pub use case::{Case, LabValues, QueryCase};
pub use diagnosis::{Diagnosis, Severity, Verdict};
pub use symptom::{
    FlagKey, FlagVector, LAB_FLAG_COUNT, LabFlag, LabFlags, SYMPTOM_COUNT, Symptom, SymptomFlags,
};
pub use traits::EntityModel;
