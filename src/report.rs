//! Diagnosis reports
//!
//! A report bundles one reasoning outcome with the patient identity, the
//! reported symptoms and the recommendations for the verdict. It serializes
//! to JSON and renders as plain text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::algorithm::cbr::{DiagnosisOutcome, DiagnosisVotes, RetrievalSummary, SimilarityResult};
use crate::algorithm::recommendation::{Recommendations, recommend};
use crate::ingest::PatientInfo;
use crate::models::{LabFlag, QueryCase, Severity, Symptom, Verdict};

/// Number of similar cases shown in the text rendering
const DISPLAYED_CASES: usize = 5;

/// Everything shown to the user for one query
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub patient: PatientInfo,
    pub generated_at: DateTime<Utc>,
    pub verdict: Verdict,
    pub confidence: f64,
    pub severity: Severity,
    pub diagnosis_votes: DiagnosisVotes,
    pub total_symptom_count: usize,
    pub reported_symptoms: Vec<Symptom>,
    pub reported_lab_flags: Vec<LabFlag>,
    pub similar_cases: Vec<SimilarityResult>,
    pub summary: Option<RetrievalSummary>,
    pub recommendations: Recommendations,
}

impl DiagnosisReport {
    /// Assemble a report from a finished reasoning cycle
    #[must_use]
    pub fn new(patient: PatientInfo, query: &QueryCase, outcome: DiagnosisOutcome) -> Self {
        let aggregation = outcome.aggregation;
        Self {
            patient,
            generated_at: Utc::now(),
            verdict: aggregation.verdict,
            confidence: aggregation.confidence,
            severity: aggregation.severity,
            diagnosis_votes: aggregation.diagnosis_votes,
            total_symptom_count: outcome.total_symptom_count,
            reported_symptoms: query.symptoms.present().collect(),
            reported_lab_flags: query
                .lab_flags
                .map(|labs| labs.present().collect())
                .unwrap_or_default(),
            similar_cases: outcome.similar_cases,
            summary: outcome.summary,
            recommendations: recommend(aggregation.verdict, aggregation.severity),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, lines: &[&str]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n{title}:")?;
    for line in lines {
        writeln!(f, "  - {line}")?;
    }
    Ok(())
}

impl fmt::Display for DiagnosisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dengue Screening Report")?;
        writeln!(
            f,
            "  Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        write!(f, "  Patient: {}", self.patient.name)?;
        if let Some(age) = self.patient.age {
            write!(f, ", {age} years")?;
        }
        if let Some(gender) = &self.patient.gender {
            write!(f, ", {gender}")?;
        }
        writeln!(f)?;

        let symptoms: Vec<&str> = self
            .reported_symptoms
            .iter()
            .map(|s| s.description())
            .collect();
        let listed = if symptoms.is_empty() {
            "none".to_string()
        } else {
            symptoms.join(", ")
        };
        writeln!(
            f,
            "  Reported symptoms ({}): {}",
            self.total_symptom_count,
            listed
        )?;
        if !self.reported_lab_flags.is_empty() {
            let labs: Vec<&str> = self
                .reported_lab_flags
                .iter()
                .map(|l| l.description())
                .collect();
            writeln!(f, "  Lab findings: {}", labs.join(", "))?;
        }

        writeln!(f, "\nVerdict: {}", self.verdict)?;
        if let Some(diagnosis) = self.verdict.diagnosis() {
            writeln!(f, "  {}", diagnosis.description())?;
        }
        writeln!(f, "  Confidence: {:.1}%", self.confidence)?;
        writeln!(
            f,
            "  Severity: {} ({})",
            self.severity,
            self.severity.description()
        )?;
        writeln!(f, "  Votes: {}", self.diagnosis_votes)?;

        if let Some(summary) = &self.summary {
            writeln!(f, "\n{summary}")?;
        }

        if !self.similar_cases.is_empty() {
            writeln!(f, "\nMost similar cases:")?;
            for (rank, case) in self.similar_cases.iter().take(DISPLAYED_CASES).enumerate() {
                writeln!(
                    f,
                    "  {}. {} {:.1}% {} / {} ({} matched)",
                    rank + 1,
                    case.case_id,
                    case.similarity_score,
                    case.diagnosis,
                    case.severity,
                    case.matched_symptom_count
                )?;
            }
        }

        let rec = &self.recommendations;
        write_section(f, "Immediate actions", &rec.immediate_actions)?;
        write_section(f, "Laboratory tests", &rec.lab_tests)?;
        write_section(f, "Treatment", &rec.treatment)?;
        write_section(f, "Monitoring", &rec.monitoring)?;
        write_section(f, "Prevention", &rec.prevention)?;
        writeln!(
            f,
            "\nThis result is advisory only and does not replace a clinical diagnosis."
        )
    }
}
