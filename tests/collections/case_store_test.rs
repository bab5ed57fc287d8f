//! Case store construction and lookup

use dbd_cbr::models::{LabFlags, SymptomFlags};
use dbd_cbr::{Case, CaseStore, CbrError, Diagnosis, Severity, Symptom};

use crate::utils::{case, clinic_store};

#[test]
fn test_clinic_store_counts() {
    let store = clinic_store();
    assert_eq!(store.size(), 7);
    assert!(!store.is_lab_aware());

    let counts = store.label_counts();
    assert_eq!(counts[&Diagnosis::DbdPositif], 3);
    assert_eq!(counts[&Diagnosis::SuspekDbd], 2);
    assert_eq!(counts[&Diagnosis::BukanDbd], 2);
}

#[test]
fn test_find_by_id() {
    let store = clinic_store();
    let found = store.find_by_id("SUS_002").unwrap();
    assert_eq!(found.diagnosis, Diagnosis::SuspekDbd);
    assert!(found.symptoms.get(Symptom::Anorexia));

    let err = store.find_by_id("DBD_999").unwrap_err();
    assert!(matches!(err, CbrError::NotFound(ref id) if id == "DBD_999"));
}

#[test]
fn test_iteration_follows_insertion_order() {
    let store = clinic_store();
    let ids: Vec<&str> = (&store).into_iter().map(|c| c.case_id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"DBD_001"));
    assert_eq!(ids.last(), Some(&"NEG_002"));
    assert_eq!(store.all_cases().len(), ids.len());
}

#[test]
fn test_schema_violations() {
    let inconsistent = case("X1", &[], Diagnosis::DbdPositif, Severity::NonDbd);
    let err = CaseStore::build(vec![inconsistent]).unwrap_err();
    assert!(matches!(err, CbrError::SchemaViolation { ref case_id, .. } if case_id == "X1"));

    let output_only = case("X2", &[], Diagnosis::BukanDbd, Severity::Insufficient);
    assert!(CaseStore::build(vec![output_only]).is_err());

    let unnamed = Case::new(" ", SymptomFlags::new(), Diagnosis::BukanDbd, Severity::NonDbd);
    assert!(matches!(
        CaseStore::build(vec![unnamed]),
        Err(CbrError::SchemaViolation { .. })
    ));
}

#[test]
fn test_duplicate_ids() {
    let err = CaseStore::build(vec![
        case("A", &[], Diagnosis::BukanDbd, Severity::NonDbd),
        case("A", &[Symptom::Rash], Diagnosis::SuspekDbd, Severity::Observasi),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_lab_flags_all_or_none() {
    let labelled =
        case("A", &[], Diagnosis::BukanDbd, Severity::NonDbd).with_lab_flags(LabFlags::new());
    let plain = case("B", &[], Diagnosis::BukanDbd, Severity::NonDbd);

    assert!(CaseStore::build(vec![labelled.clone(), plain]).is_err());

    let store = CaseStore::build(vec![
        labelled,
        case("C", &[Symptom::HighFever], Diagnosis::SuspekDbd, Severity::Observasi)
            .with_lab_flags(LabFlags::all_present()),
    ])
    .unwrap();
    assert!(store.is_lab_aware());
}
