//! Top-K retrieval of the most similar cases

use std::cmp::Ordering;

use crate::algorithm::cbr::similarity::SimilarityResult;

/// Keep the `k` highest-scoring results, best first.
///
/// The sort is stable, so equal scores keep store order. NaN scores compare
/// as equal to everything and therefore keep their relative position.
#[must_use]
pub fn retrieve_top_k(mut results: Vec<SimilarityResult>, k: usize) -> Vec<SimilarityResult> {
    if k == 0 {
        return Vec::new();
    }

    results.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(k);
    results
}
