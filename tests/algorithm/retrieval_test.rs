//! Top-K retrieval ordering

use dbd_cbr::algorithm::cbr::retrieve_top_k;
use dbd_cbr::{Diagnosis, Severity, SimilarityResult};

fn scored(id: &str, score: f64) -> SimilarityResult {
    SimilarityResult {
        case_id: id.to_string(),
        similarity_score: score,
        matched_symptom_count: 0,
        diagnosis: Diagnosis::SuspekDbd,
        severity: Severity::Observasi,
    }
}

fn ids(results: &[SimilarityResult]) -> Vec<String> {
    results.iter().map(|r| r.case_id.clone()).collect()
}

#[test]
fn test_equal_scores_keep_store_order() {
    let results = vec![scored("A", 90.0), scored("B", 90.0), scored("C", 80.0)];
    assert_eq!(ids(&retrieve_top_k(results, 2)), vec!["A", "B"]);
}

#[test]
fn test_output_is_sorted_descending() {
    let results: Vec<_> = [12.0, 99.5, 40.0, 99.5, 75.0, -3.0]
        .iter()
        .enumerate()
        .map(|(i, &score)| scored(&format!("C{i}"), score))
        .collect();
    let top = retrieve_top_k(results, 10);

    assert_eq!(top.len(), 6);
    assert!(top.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
    assert_eq!(ids(&top[..2]), vec!["C1", "C3"]);
}

#[test]
fn test_length_is_bounded() {
    let results: Vec<_> = (0..25).map(|i| scored(&format!("C{i}"), f64::from(i))).collect();
    assert_eq!(retrieve_top_k(results.clone(), 10).len(), 10);
    assert_eq!(retrieve_top_k(results[..3].to_vec(), 10).len(), 3);
    assert!(retrieve_top_k(results, 0).is_empty());
}
