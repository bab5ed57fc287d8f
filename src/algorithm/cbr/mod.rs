//! Case-based reasoning over the dengue case base
//!
//! One reasoning cycle scores the query against every stored case, keeps the
//! `k` most similar, and lets them vote on the diagnosis and severity:
//!
//! 1. Similarity: weighted Manhattan distance under a `SimilarityProfile`
//! 2. Retrieval: stable top-K by descending score
//! 3. Voting: similarity-weighted shares per diagnosis and severity
//!
//! There is no retain step. The case store is never modified.

pub mod profile;
pub mod retrieval;
pub mod similarity;
pub mod statistics;
pub mod voting;

pub use profile::{ProfileKind, SimilarityProfile};
pub use retrieval::retrieve_top_k;
pub use similarity::{SimilarityEngine, SimilarityResult, compute_similarity};
pub use statistics::RetrievalSummary;
pub use voting::{Aggregation, DiagnosisVotes, aggregate};

use log::{debug, info};
use serde::Serialize;

use crate::collections::CaseStore;
use crate::config::{CbrConfig, VotingPolicy};
use crate::error::{CbrError, Result};
use crate::models::QueryCase;

/// Everything produced by one reasoning cycle
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisOutcome {
    /// Verdict, confidence, votes and severity
    pub aggregation: Aggregation,
    /// The retrieved cases, best first
    pub similar_cases: Vec<SimilarityResult>,
    /// Number of symptoms reported in the query
    pub total_symptom_count: usize,
    /// Statistics of the retrieved cases, if any were retrieved
    pub summary: Option<RetrievalSummary>,
}

/// Runs reasoning cycles against one case store
#[derive(Debug)]
pub struct CbrEngine<'a> {
    store: &'a CaseStore,
    similarity: SimilarityEngine,
    top_k: usize,
    voting: VotingPolicy,
}

impl<'a> CbrEngine<'a> {
    /// Create an engine over `store`.
    ///
    /// The profile comes from `config.profile` when set, otherwise from the
    /// store's lab awareness. A lab-aware store combined with a profile that
    /// has no lab weights is rejected.
    pub fn new(store: &'a CaseStore, config: CbrConfig) -> Result<Self> {
        let profile = match config.profile {
            Some(profile) => {
                if store.is_lab_aware() && !profile.is_lab_aware() {
                    return Err(CbrError::configuration(
                        "case store carries lab flags but the similarity profile has no lab weights",
                    ));
                }
                profile
            }
            None => SimilarityProfile::for_store(store),
        };

        info!(
            "Initialising CBR engine over {} cases with the {} profile (top {})",
            store.size(),
            profile.name(),
            config.top_k
        );

        let similarity = SimilarityEngine::new(profile)
            .with_parallel(config.use_parallel, config.parallel_threshold);

        Ok(Self {
            store,
            similarity,
            top_k: config.top_k,
            voting: config.voting,
        })
    }

    /// The case store this engine reads from
    #[must_use]
    pub const fn store(&self) -> &'a CaseStore {
        self.store
    }

    /// The active similarity profile
    #[must_use]
    pub const fn profile(&self) -> &SimilarityProfile {
        self.similarity.profile()
    }

    /// Run one full reasoning cycle for `query`
    #[must_use]
    pub fn diagnose(&self, query: &QueryCase) -> DiagnosisOutcome {
        let total_symptom_count = query.total_symptom_count();
        debug!("Diagnosing query with {total_symptom_count} reported symptoms");

        let scored = self.similarity.score_all(query, self.store);
        debug!("Scored {} cases", scored.len());

        let similar_cases = retrieve_top_k(scored, self.top_k);
        debug!("Retrieved {} similar cases", similar_cases.len());

        let aggregation = aggregate(&similar_cases, total_symptom_count, &self.voting);
        info!(
            "Verdict {} ({:.1}% confidence, severity {})",
            aggregation.verdict, aggregation.confidence, aggregation.severity
        );

        DiagnosisOutcome {
            summary: RetrievalSummary::from_ranked(&similar_cases),
            aggregation,
            similar_cases,
            total_symptom_count,
        }
    }
}
