//! Weighted voting over the retrieved cases
//!
//! Each retrieved case votes for its diagnosis and severity with a weight
//! proportional to its similarity score. Diagnosis votes are expressed as
//! percentages and sum to 100 whenever at least one case votes.

use std::fmt;

use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::algorithm::cbr::similarity::SimilarityResult;
use crate::config::VotingPolicy;
use crate::models::diagnosis::SEVERITY_COUNT;
use crate::models::{Diagnosis, Severity, Verdict};

/// Vote share per diagnosis, always holding all three buckets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiagnosisVotes {
    votes: [f64; 3],
}

impl DiagnosisVotes {
    /// Vote share of `diagnosis`
    #[must_use]
    pub const fn get(&self, diagnosis: Diagnosis) -> f64 {
        self.votes[diagnosis.index()]
    }

    fn add(&mut self, diagnosis: Diagnosis, amount: f64) {
        self.votes[diagnosis.index()] += amount;
    }

    fn clear(&mut self, diagnosis: Diagnosis) {
        self.votes[diagnosis.index()] = 0.0;
    }

    /// All buckets in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Diagnosis, f64)> + '_ {
        Diagnosis::PRIORITY.iter().map(|&d| (d, self.get(d)))
    }

    /// Sum of all buckets
    #[must_use]
    pub fn total(&self) -> f64 {
        self.votes.iter().sum()
    }

    /// Highest bucket, earlier priority winning ties
    fn leader(&self) -> (Diagnosis, f64) {
        let mut best = (Diagnosis::DbdPositif, self.get(Diagnosis::DbdPositif));
        for (diagnosis, vote) in self.iter().skip(1) {
            if vote > best.1 {
                best = (diagnosis, vote);
            }
        }
        best
    }
}

impl Serialize for DiagnosisVotes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.votes.len()))?;
        for (diagnosis, vote) in self.iter() {
            map.serialize_entry(diagnosis.code(), &vote)?;
        }
        map.end()
    }
}

impl fmt::Display for DiagnosisVotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(diagnosis, vote)| format!("{diagnosis}={vote:.1}%"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Result of the voting step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Winning label, or `DATA_INSUFFICIENT`
    pub verdict: Verdict,
    /// Vote share of the verdict, 0 for `DATA_INSUFFICIENT`
    pub confidence: f64,
    /// Vote share of every diagnosis
    pub diagnosis_votes: DiagnosisVotes,
    /// Severity attached to the verdict
    pub severity: Severity,
}

impl Aggregation {
    fn insufficient(severity: Severity) -> Self {
        Self {
            verdict: Verdict::DataInsufficient,
            confidence: 0.0,
            diagnosis_votes: DiagnosisVotes::default(),
            severity,
        }
    }
}

/// Severity weights with the order in which each label was first seen
#[derive(Debug, Default)]
struct SeverityTally {
    weights: [f64; SEVERITY_COUNT],
    first_seen: SmallVec<[Severity; SEVERITY_COUNT]>,
}

impl SeverityTally {
    fn add(&mut self, severity: Severity, weight: f64) {
        if !self.first_seen.contains(&severity) {
            self.first_seen.push(severity);
        }
        self.weights[severity.index()] += weight;
    }

    /// Heaviest severity, earliest first-seen winning ties
    fn leader(&self) -> Severity {
        let mut best: Option<(Severity, f64)> = None;
        for &severity in &self.first_seen {
            let weight = self.weights[severity.index()];
            match best {
                Some((_, best_weight)) if weight <= best_weight => {}
                _ => best = Some((severity, weight)),
            }
        }
        best.map_or(Severity::Unknown, |(severity, _)| severity)
    }
}

/// Aggregate the retrieved cases into a verdict.
///
/// Queries with fewer than `policy.min_symptom_threshold` symptoms are
/// answered with `DATA_INSUFFICIENT` before any vote is counted. When the
/// screening ceiling applies, a positive verdict is ruled out and the choice
/// is between suspect and negative.
#[must_use]
pub fn aggregate(
    top_k: &[SimilarityResult],
    total_symptom_count: usize,
    policy: &VotingPolicy,
) -> Aggregation {
    if total_symptom_count < policy.min_symptom_threshold {
        debug!(
            "Only {total_symptom_count} symptoms reported (minimum {}), not voting",
            policy.min_symptom_threshold
        );
        return Aggregation::insufficient(Severity::Insufficient);
    }

    if top_k.is_empty() {
        debug!("No similar cases retrieved, not voting");
        return Aggregation::insufficient(Severity::Unknown);
    }

    let total_similarity: f64 = top_k.iter().map(|r| r.similarity_score).sum();
    let uniform = 1.0 / top_k.len() as f64;

    let mut diagnosis_votes = DiagnosisVotes::default();
    let mut severities = SeverityTally::default();

    for result in top_k {
        let weight = if total_similarity == 0.0 {
            uniform
        } else {
            result.similarity_score / total_similarity
        };
        diagnosis_votes.add(result.diagnosis, weight * 100.0);
        severities.add(result.severity, weight);
    }

    if let Some(ceiling) = policy.screening_ceiling {
        if total_symptom_count <= ceiling {
            diagnosis_votes.clear(Diagnosis::DbdPositif);
            let suspect = diagnosis_votes.get(Diagnosis::SuspekDbd);
            let negative = diagnosis_votes.get(Diagnosis::BukanDbd);
            let (verdict, confidence, severity) = if suspect >= negative {
                (Verdict::SuspekDbd, suspect, Severity::Observasi)
            } else {
                (Verdict::BukanDbd, negative, Severity::NonDbd)
            };
            debug!(
                "Screening ceiling {ceiling} applies to {total_symptom_count} symptoms: {verdict}"
            );
            return Aggregation {
                verdict,
                confidence,
                diagnosis_votes,
                severity,
            };
        }
    }

    let (diagnosis, confidence) = diagnosis_votes.leader();
    Aggregation {
        verdict: diagnosis.into(),
        confidence,
        diagnosis_votes,
        severity: severities.leader(),
    }
}
