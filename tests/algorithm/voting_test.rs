//! Voting rules: insufficient-data gate, screening ceiling and vote shares

use dbd_cbr::algorithm::cbr::aggregate;
use dbd_cbr::models::FlagKey;
use dbd_cbr::{CbrConfig, CbrEngine, Diagnosis, Severity, Symptom, Verdict, VotingPolicy};

use crate::utils::{clinic_store, query};

#[test]
fn test_two_symptoms_are_insufficient() {
    let store = clinic_store();
    let engine = CbrEngine::new(&store, CbrConfig::default()).unwrap();
    let outcome = engine.diagnose(&query(&[Symptom::HighFever, Symptom::Petechiae]));

    assert_eq!(outcome.total_symptom_count, 2);
    assert_eq!(outcome.aggregation.verdict, Verdict::DataInsufficient);
    assert_eq!(outcome.aggregation.confidence, 0.0);
    assert_eq!(outcome.aggregation.severity, Severity::Insufficient);
    for (_, vote) in outcome.aggregation.diagnosis_votes.iter() {
        assert_eq!(vote, 0.0);
    }
}

#[test]
fn test_four_symptoms_never_positive() {
    let store = clinic_store();
    let engine = CbrEngine::new(&store, CbrConfig::default()).unwrap();
    // Matches DBD_003 except for one symptom
    let outcome = engine.diagnose(&query(&[
        Symptom::HighFever,
        Symptom::MusclePain,
        Symptom::Petechiae,
        Symptom::LowPlatelet,
    ]));

    assert_ne!(outcome.aggregation.verdict, Verdict::DbdPositif);
    assert_eq!(
        outcome.aggregation.diagnosis_votes.get(Diagnosis::DbdPositif),
        0.0
    );
    assert!(matches!(
        outcome.aggregation.severity,
        Severity::Observasi | Severity::NonDbd
    ));
}

#[test]
fn test_ceiling_is_configurable() {
    let store = clinic_store();
    let present = [
        Symptom::HighFever,
        Symptom::MusclePain,
        Symptom::Petechiae,
        Symptom::LowPlatelet,
    ];

    let config = CbrConfig::builder().screening_ceiling(None).top_k(1).build();
    let engine = CbrEngine::new(&store, config).unwrap();
    let outcome = engine.diagnose(&query(&present));
    assert_eq!(outcome.aggregation.verdict, Verdict::DbdPositif);
    assert_eq!(outcome.aggregation.severity, Severity::Ringan);

    let config = CbrConfig::builder().screening_ceiling(Some(3)).top_k(1).build();
    let engine = CbrEngine::new(&store, config).unwrap();
    assert_eq!(
        engine.diagnose(&query(&present)).aggregation.verdict,
        Verdict::DbdPositif
    );
}

#[test]
fn test_votes_are_conserved() {
    let store = clinic_store();
    let engine = CbrEngine::new(&store, CbrConfig::default()).unwrap();
    let queries: [&[Symptom]; 3] = [
        &[
            Symptom::HighFever,
            Symptom::Headache,
            Symptom::JointPain,
            Symptom::MusclePain,
            Symptom::Petechiae,
        ],
        &[
            Symptom::Headache,
            Symptom::NauseaVomiting,
            Symptom::Lethargy,
            Symptom::Anorexia,
            Symptom::AbdominalPain,
        ],
        Symptom::ALL,
    ];

    for present in queries {
        let outcome = engine.diagnose(&query(present));
        let votes = outcome.aggregation.diagnosis_votes;
        assert!((votes.total() - 100.0).abs() < 1e-6, "votes: {votes}");
        assert!(
            (outcome.aggregation.confidence
                - votes.get(outcome.aggregation.verdict.diagnosis().unwrap()))
            .abs()
                < 1e-9
        );
    }
}

#[test]
fn test_aggregate_never_fails_on_degenerate_input() {
    let policy = VotingPolicy::default();
    let aggregation = aggregate(&[], 0, &policy);
    assert_eq!(aggregation.verdict, Verdict::DataInsufficient);
    assert_eq!(aggregation.severity, Severity::Insufficient);

    let aggregation = aggregate(&[], 15, &policy);
    assert_eq!(aggregation.severity, Severity::Unknown);
}
