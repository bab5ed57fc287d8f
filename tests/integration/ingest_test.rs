//! Loading and writing case bases and hematology records

use std::fs;

use dbd_cbr::ingest::{
    SampledSynthesizer, ThresholdSynthesizer, load_case_base, load_lab_records,
    simulated_case_base, synthesize_cases, write_case_base_json, write_case_base_parquet,
};
use dbd_cbr::models::{LabFlag, LabFlags, LabValues};
use dbd_cbr::{CaseStore, CbrError, Diagnosis, Severity, Symptom};

use crate::utils::{case, clinic_store, temp_path};

const LAB_RECORDS_JSON: &str = r#"[
    {"Gender": "Female", "Age": 24, "Hemoglobin(g/dl)": 10.5, "Neutrophils(%)": 60,
     "Lymphocytes(%)": 30, "HCT(%)": 49.0, "Total Platelet Count(/cumm)": 45000,
     "Total WBC count(/cumm)": 3500, "Result": "positive"},
    {"Gender": "Male", "Age": 41, "Hemoglobin(g/dl)": 14.2, "Neutrophils(%)": 55,
     "Lymphocytes(%)": 35, "HCT(%)": 42.0, "Total Platelet Count(/cumm)": 210000,
     "Total WBC count(/cumm)": 6800, "Result": "negative"},
    {"Gender": "Male", "Age": null, "Hemoglobin(g/dl)": 13.0, "Neutrophils(%)": null,
     "Lymphocytes(%)": null, "HCT(%)": 55.5, "Total Platelet Count(/cumm)": 85000,
     "Total WBC count(/cumm)": 4200, "Result": "positive"}
]"#;

#[test]
fn test_json_round_trip() {
    let (_dir, path) = temp_path("cases.json");
    let store = clinic_store();
    write_case_base_json(store.all_cases(), &path).unwrap();

    let loaded = load_case_base(&path).unwrap();

    assert_eq!(loaded.as_slice(), store.all_cases());
    let reloaded = CaseStore::build(loaded).unwrap();
    assert_eq!(reloaded.label_counts(), store.label_counts());
}

#[test]
fn test_temporary_files_are_removed_with_their_directory() {
    let (dir, path) = temp_path("cases.json");
    write_case_base_json(clinic_store().all_cases(), &path).unwrap();
    assert!(path.exists());

    drop(dir);
    assert!(!path.exists());
}

#[test]
fn test_parquet_round_trip_with_labs() {
    let (_dir, path) = temp_path("cases.parquet");
    let cases = vec![
        case(
            "P1",
            &[Symptom::HighFever, Symptom::LowPlatelet],
            Diagnosis::DbdPositif,
            Severity::Sedang,
        )
        .with_lab_flags(LabFlags::from_present([LabFlag::HighHematocrit]))
        .with_lab_values(LabValues {
            platelet: Some(42_000.0),
            hematocrit: Some(49.5),
            wbc: Some(3_100.0),
            hemoglobin: Some(11.2),
            age: Some(19),
            gender: Some("female".to_string()),
        }),
        case("N1", &[Symptom::Headache], Diagnosis::BukanDbd, Severity::NonDbd)
            .with_lab_flags(LabFlags::new()),
    ];
    write_case_base_parquet(&cases, &path).unwrap();

    let loaded = load_case_base(&path).unwrap();

    assert_eq!(loaded, cases);
    assert!(CaseStore::build(loaded).unwrap().is_lab_aware());
}

#[test]
fn test_simulated_base_survives_parquet() {
    let (_dir, path) = temp_path("simulated.parquet");
    let cases = simulated_case_base(42);
    write_case_base_parquet(&cases, &path).unwrap();

    let loaded = load_case_base(&path).unwrap();

    assert_eq!(loaded.len(), 90);
    assert_eq!(loaded, cases);
}

#[test]
fn test_invalid_rows_are_schema_violations() {
    let (_dir, path) = temp_path("invalid_cases.json");

    fs::write(&path, r#"[{"diagnosis": "BUKAN_DBD", "severity": "NON_DBD"}]"#).unwrap();
    let err = load_case_base(&path).unwrap_err();
    assert!(matches!(err, CbrError::SchemaViolation { ref case_id, .. } if case_id == "row 0"));

    fs::write(
        &path,
        r#"[{"case_id": "X1", "diagnosis": "BUKAN_DBD", "severity": "NON_DBD", "demam_tinggi": 1}]"#,
    )
    .unwrap();
    let err = load_case_base(&path).unwrap_err();
    assert!(matches!(err, CbrError::SchemaViolation { ref case_id, .. } if case_id == "X1"));

    fs::write(&path, "not json").unwrap();
    assert!(matches!(load_case_base(&path), Err(CbrError::Json(_))));
}

#[test]
fn test_unsupported_extension() {
    let (_dir, path) = temp_path("cases.csv");
    let err = load_case_base(&path).unwrap_err();
    assert!(matches!(err, CbrError::Configuration(_)));
}

#[test]
fn test_lab_records_to_store() {
    let (_dir, path) = temp_path("lab_records.json");
    fs::write(&path, LAB_RECORDS_JSON).unwrap();
    let records = load_lab_records(&path).unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[0].is_positive());
    assert!(records[2].age.is_none());

    let cases = synthesize_cases(&records, &mut ThresholdSynthesizer::new());
    let store = CaseStore::build(cases).unwrap();
    assert!(!store.is_lab_aware());
    assert_eq!(store.label_counts()[&Diagnosis::DbdPositif], 2);

    let first = store.find_by_id("CSV_0001").unwrap();
    assert_eq!(first.severity, Severity::Sedang);
    assert!(first.symptoms.get(Symptom::Petechiae));
    assert_eq!(
        first.lab_values.as_ref().and_then(|v| v.gender.as_deref()),
        Some("female")
    );

    let third = store.find_by_id("CSV_0003").unwrap();
    assert_eq!(third.severity, Severity::Ringan);
    assert!(third.symptoms.get(Symptom::LowPlatelet));
}

#[test]
fn test_sampled_synthesizer_is_seeded() {
    let (_dir, path) = temp_path("lab_records_sampled.json");
    fs::write(&path, LAB_RECORDS_JSON).unwrap();
    let records = load_lab_records(&path).unwrap();

    let first = synthesize_cases(&records, &mut SampledSynthesizer::new(42));
    let second = synthesize_cases(&records, &mut SampledSynthesizer::new(42));
    assert_eq!(first, second);
    assert_eq!(first[0].case_id, "CSV_001");

    let store = CaseStore::build(first).unwrap();
    assert!(store.is_lab_aware());

    let positive = store.find_by_id("CSV_001").unwrap();
    let labs = positive.lab_flags.unwrap();
    assert!(labs.get(LabFlag::HighHematocrit));
    assert!(labs.get(LabFlag::LowLeukocyte));
    assert!(labs.get(LabFlag::LowHemoglobin));
    assert_eq!(positive.severity, Severity::Sedang);
}
