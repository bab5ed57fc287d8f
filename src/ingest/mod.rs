//! Data ingestion
//!
//! Everything that turns files into cases and queries: the case-base loader
//! for JSON and Parquet, hematology records with their case synthesizers,
//! the seeded simulated case base, and query submissions.

pub mod lab_record;
pub mod loader;
pub mod query;
pub mod record;
pub mod simulation;
pub mod synthesizer;

pub use lab_record::LabRecord;
pub use loader::{
    DataFormat, load_case_base, load_lab_records, write_case_base_json, write_case_base_parquet,
};
pub use query::{PatientInfo, QuerySubmission};
pub use record::CaseRecord;
pub use simulation::simulated_case_base;
pub use synthesizer::{CaseSynthesizer, SampledSynthesizer, ThresholdSynthesizer, synthesize_cases};
