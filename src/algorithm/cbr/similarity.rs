//! Weighted Manhattan similarity between a query and stored cases
//!
//! The distance is the weighted sum of per-feature absolute differences over
//! the symptom flags, plus the lab flags when the profile and both records
//! carry them. Similarity is `(1 - distance) * 100`.

use indicatif::ParallelProgressIterator;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::cbr::profile::SimilarityProfile;
use crate::collections::CaseStore;
use crate::config::{DEFAULT_PARALLEL_THRESHOLD, WEIGHT_SUM_TOLERANCE};
use crate::models::{Case, Diagnosis, QueryCase, Severity};
use crate::utils::logging::{create_row_progress_bar, finish_progress_bar};

/// Score of one stored case against the query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    /// Id of the stored case
    pub case_id: String,
    /// `(1 - weighted distance) * 100`
    pub similarity_score: f64,
    /// Symptoms present in both the query and the case
    pub matched_symptom_count: usize,
    /// Diagnosis of the stored case
    pub diagnosis: Diagnosis,
    /// Severity of the stored case
    pub severity: Severity,
}

/// Score one case against the query.
///
/// Lab flags contribute only when the profile has lab weights and both
/// records carry lab flags. The score is not clamped.
#[must_use]
pub fn compute_similarity(
    query: &QueryCase,
    case: &Case,
    profile: &SimilarityProfile,
) -> SimilarityResult {
    let mut distance = 0.0;
    let mut matched_symptom_count = 0;

    for (symptom, present) in query.symptoms.iter() {
        let stored = case.symptoms.get(symptom);
        if present != stored {
            distance += profile.symptom_weight(symptom);
        } else if present {
            matched_symptom_count += 1;
        }
    }

    if let (Some(query_labs), Some(case_labs)) = (&query.lab_flags, &case.lab_flags) {
        for (flag, present) in query_labs.iter() {
            if present != case_labs.get(flag) {
                distance += profile.lab_weight(flag).unwrap_or_default();
            }
        }
    }

    SimilarityResult {
        case_id: case.case_id.clone(),
        similarity_score: (1.0 - distance) * 100.0,
        matched_symptom_count,
        diagnosis: case.diagnosis,
        severity: case.severity,
    }
}

/// Scores a query against every case in a store
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    profile: SimilarityProfile,
    use_parallel: bool,
    parallel_threshold: usize,
}

impl SimilarityEngine {
    /// Create an engine for `profile`.
    ///
    /// A profile whose weights do not sum to 1.0 is accepted; scores then
    /// fall outside 0..=100 and are passed on as they are.
    #[must_use]
    pub fn new(profile: SimilarityProfile) -> Self {
        if !profile.validate_normalization(WEIGHT_SUM_TOLERANCE) {
            warn!(
                "Similarity profile '{}' weights sum to {:.6}, scores may fall outside 0..=100",
                profile.name(),
                profile.total_weight()
            );
        }

        Self {
            profile,
            use_parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Enable or disable parallel scoring
    #[must_use]
    pub const fn with_parallel(mut self, use_parallel: bool, threshold: usize) -> Self {
        self.use_parallel = use_parallel;
        self.parallel_threshold = threshold;
        self
    }

    /// The active profile
    #[must_use]
    pub const fn profile(&self) -> &SimilarityProfile {
        &self.profile
    }

    /// Score every stored case, in store order
    #[must_use]
    pub fn score_all(&self, query: &QueryCase, store: &CaseStore) -> Vec<SimilarityResult> {
        let cases = store.all_cases();

        if self.use_parallel && cases.len() >= self.parallel_threshold {
            debug!(
                "Scoring {} cases in parallel with {} threads",
                cases.len(),
                rayon::current_num_threads()
            );
            let pb = create_row_progress_bar(cases.len(), Some("Scoring cases"));
            let results = cases
                .par_iter()
                .progress_with(pb.clone())
                .map(|case| compute_similarity(query, case, &self.profile))
                .collect();
            finish_progress_bar(&pb, None);
            results
        } else {
            debug!("Scoring {} cases sequentially", cases.len());
            cases
                .iter()
                .map(|case| compute_similarity(query, case, &self.profile))
                .collect()
        }
    }
}
