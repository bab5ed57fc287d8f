//! Summary statistics of a retrieval

use std::fmt;

use serde::Serialize;

use crate::algorithm::cbr::similarity::SimilarityResult;

/// Summary of the retrieved cases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalSummary {
    /// Score of the best match
    pub top_similarity: f64,
    /// Matched symptoms of the best match
    pub top_matched_symptoms: usize,
    /// Mean score over the retrieved cases
    pub mean_similarity: f64,
    /// Matched symptoms summed over the retrieved cases
    pub total_matched_symptoms: usize,
    /// Number of retrieved cases
    pub case_count: usize,
}

impl RetrievalSummary {
    /// Summarize a ranked list, best match first. Returns `None` when empty.
    #[must_use]
    pub fn from_ranked(ranked: &[SimilarityResult]) -> Option<Self> {
        let best = ranked.first()?;
        let total_similarity: f64 = ranked.iter().map(|r| r.similarity_score).sum();

        Some(Self {
            top_similarity: best.similarity_score,
            top_matched_symptoms: best.matched_symptom_count,
            mean_similarity: total_similarity / ranked.len() as f64,
            total_matched_symptoms: ranked.iter().map(|r| r.matched_symptom_count).sum(),
            case_count: ranked.len(),
        })
    }
}

impl fmt::Display for RetrievalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Retrieval Summary:")?;
        writeln!(f, "  Cases retrieved: {}", self.case_count)?;
        writeln!(
            f,
            "  Best match: {:.1}% ({} matched symptoms)",
            self.top_similarity, self.top_matched_symptoms
        )?;
        writeln!(f, "  Mean similarity: {:.1}%", self.mean_similarity)?;
        write!(f, "  Total matched symptoms: {}", self.total_matched_symptoms)
    }
}
