//! Full reasoning cycles from case store to report

use dbd_cbr::algorithm::cbr::ProfileKind;
use dbd_cbr::ingest::{
    CaseSynthesizer, LabRecord, QuerySubmission, ThresholdSynthesizer, simulated_case_base,
    synthesize_cases,
};
use dbd_cbr::models::FlagKey;
use dbd_cbr::{
    CaseStore, CbrConfig, CbrEngine, Diagnosis, DiagnosisReport, Severity, Symptom, Verdict,
};

use crate::utils::{all_symptoms, clinic_store, query, scenario_store};

fn lab_record(gender: &str, hb: f64, hct: f64, platelet: f64, wbc: f64, result: &str) -> LabRecord {
    LabRecord {
        gender: gender.to_string(),
        age: Some(30.0),
        hemoglobin: hb,
        neutrophils: None,
        lymphocytes: None,
        hematocrit: hct,
        platelet,
        wbc,
        result: result.to_string(),
    }
}

#[test]
fn test_scenario_ranking_and_votes() {
    let store = scenario_store();
    let engine = CbrEngine::new(&store, CbrConfig::default()).unwrap();
    let outcome = engine.diagnose(&query(&all_symptoms()));

    let ranked: Vec<(&str, f64)> = outcome
        .similar_cases
        .iter()
        .map(|r| (r.case_id.as_str(), r.similarity_score))
        .collect();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].0, "A");
    assert_eq!(ranked[1].0, "C");
    assert_eq!(ranked[2].0, "B");
    assert!((ranked[0].1 - 100.0).abs() < 1e-9);
    assert!((ranked[1].1 - 12.0).abs() < 1e-9);
    assert!(ranked[2].1.abs() < 1e-9);

    let aggregation = &outcome.aggregation;
    assert_eq!(aggregation.verdict, Verdict::DbdPositif);
    assert_eq!(aggregation.severity, Severity::Berat);
    let expected = 100.0 / 112.0 * 100.0;
    assert!((aggregation.confidence - expected).abs() < 1e-9);
    assert!(
        (aggregation.diagnosis_votes.get(Diagnosis::SuspekDbd) - 12.0 / 112.0 * 100.0).abs()
            < 1e-9
    );
    assert!(aggregation.diagnosis_votes.get(Diagnosis::BukanDbd).abs() < 1e-9);
    assert!((aggregation.diagnosis_votes.total() - 100.0).abs() < 1e-9);

    let summary = outcome.summary.unwrap();
    assert_eq!(summary.case_count, 3);
    assert_eq!(summary.top_matched_symptoms, 15);
}

#[test]
fn test_clinic_report() {
    let store = clinic_store();
    let engine = CbrEngine::new(&store, CbrConfig::builder().top_k(3).build()).unwrap();

    let submission = QuerySubmission::from_json(
        r#"{
            "patient": {"name": "Budi", "age": 12, "gender": "male"},
            "symptoms": {
                "demam_tinggi": 1, "sakit_kepala": 1, "nyeri_sendi": 1, "nyeri_otot": 1,
                "bintik_merah": 1, "trombosit_rendah": 1, "nyeri_belakang_mata": 1
            }
        }"#,
    )
    .unwrap();
    let query = submission.to_query();
    let outcome = engine.diagnose(&query);
    assert_eq!(outcome.similar_cases[0].case_id, "DBD_001");
    assert_eq!(outcome.similar_cases.len(), 3);

    let report = DiagnosisReport::new(submission.patient(), &query, outcome);
    assert_eq!(report.verdict, Verdict::DbdPositif);
    assert_eq!(report.severity, Severity::Sedang);
    assert!(report.recommendations.iter().count() > 0);

    let text = report.to_string();
    assert!(text.contains("Patient: Budi, 12 years, male"));
    assert!(text.contains("1. DBD_001 100.0%"));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["verdict"], "DBD_POSITIF");
    assert_eq!(json["similar_cases"].as_array().unwrap().len(), 3);
}

#[test]
fn test_simulated_base_is_reproducible() {
    let first = CaseStore::build(simulated_case_base(7)).unwrap();
    let second = CaseStore::build(simulated_case_base(7)).unwrap();
    assert_eq!(first.size(), 90);
    assert_eq!(first.all_cases(), second.all_cases());

    let present = [
        Symptom::HighFever,
        Symptom::Headache,
        Symptom::JointPain,
        Symptom::MusclePain,
        Symptom::Petechiae,
        Symptom::LowPlatelet,
    ];
    let left = CbrEngine::new(&first, CbrConfig::default())
        .unwrap()
        .diagnose(&query(&present));
    let right = CbrEngine::new(&second, CbrConfig::default())
        .unwrap()
        .diagnose(&query(&present));

    assert_eq!(left.similar_cases, right.similar_cases);
    assert_eq!(left.aggregation, right.aggregation);
    assert_eq!(left.similar_cases.len(), 10);
    assert!((left.aggregation.diagnosis_votes.total() - 100.0).abs() < 1e-6);
}

#[test]
fn test_parallel_scoring_matches_sequential() {
    let store = CaseStore::build(simulated_case_base(11)).unwrap();
    let sequential =
        CbrEngine::new(&store, CbrConfig::builder().use_parallel(false).build()).unwrap();
    let parallel = CbrEngine::new(
        &store,
        CbrConfig::builder().use_parallel(true).parallel_threshold(1).build(),
    )
    .unwrap();

    let q = query(&[
        Symptom::HighFever,
        Symptom::Rash,
        Symptom::Lethargy,
        Symptom::Anorexia,
    ]);
    assert_eq!(
        sequential.diagnose(&q).similar_cases,
        parallel.diagnose(&q).similar_cases
    );
}

#[test]
fn test_lab_aware_store() {
    let records = vec![
        lab_record("Female", 11.0, 50.0, 15_000.0, 3_000.0, "positive"),
        lab_record("Male", 14.0, 40.0, 250_000.0, 7_000.0, "negative"),
    ];
    let mut synthesizer = ThresholdSynthesizer::new().with_lab_flags(true);
    assert_eq!(synthesizer.name(), "threshold");
    let cases = synthesize_cases(&records, &mut synthesizer);
    assert_eq!(cases[0].case_id, "CSV_0001");
    assert_eq!(cases[0].symptoms.count(), Symptom::ALL.len());

    let store = CaseStore::build(cases).unwrap();
    assert!(store.is_lab_aware());

    let engine = CbrEngine::new(&store, CbrConfig::default()).unwrap();
    assert_eq!(engine.profile().kind(), ProfileKind::LabAware);

    let submission = QuerySubmission::from_json(
        r#"{
            "symptoms": {
                "demam_tinggi": 1, "sakit_kepala": 1, "nyeri_sendi": 1, "nyeri_otot": 1,
                "mual_muntah": 1, "ruam_kulit": 1, "nyeri_perut": 1, "mimisan": 1,
                "gusi_berdarah": 1, "bintik_merah": 1, "lemah_lesu": 1,
                "kehilangan_nafsu_makan": 1, "nyeri_belakang_mata": 1,
                "pembesaran_hati": 1, "trombosit_rendah": 1
            },
            "labs": {"hematokrit_tinggi": 1, "leukosit_rendah": 1, "hemoglobin_rendah": 1}
        }"#,
    )
    .unwrap();
    let outcome = engine.diagnose(&submission.to_query());

    assert!((outcome.similar_cases[0].similarity_score - 100.0).abs() < 1e-9);
    assert!(outcome.similar_cases[1].similarity_score.abs() < 1e-9);
    assert_eq!(outcome.aggregation.verdict, Verdict::DbdPositif);
    assert_eq!(outcome.aggregation.severity, Severity::Berat);
    assert!((outcome.aggregation.confidence - 100.0).abs() < 1e-9);
}
