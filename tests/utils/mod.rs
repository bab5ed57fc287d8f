//! Shared fixtures for integration tests

use std::path::PathBuf;

use dbd_cbr::models::{FlagKey, SymptomFlags};
use dbd_cbr::{Case, CaseStore, Diagnosis, QueryCase, Severity, Symptom};
use tempfile::TempDir;

/// A stored case with the given symptoms present
#[must_use]
pub fn case(id: &str, present: &[Symptom], diagnosis: Diagnosis, severity: Severity) -> Case {
    Case::new(
        id,
        SymptomFlags::from_present(present.iter().copied()),
        diagnosis,
        severity,
    )
}

/// A query with the given symptoms present
#[must_use]
pub fn query(present: &[Symptom]) -> QueryCase {
    QueryCase::from_symptoms(present.iter().copied())
}

/// Every symptom, in canonical order
#[must_use]
pub fn all_symptoms() -> Vec<Symptom> {
    Symptom::ALL.to_vec()
}

/// Three-case store: A has every symptom, B none, C only fever
#[must_use]
pub fn scenario_store() -> CaseStore {
    CaseStore::build(vec![
        case("A", &all_symptoms(), Diagnosis::DbdPositif, Severity::Berat),
        case("B", &[], Diagnosis::BukanDbd, Severity::NonDbd),
        case(
            "C",
            &[Symptom::HighFever],
            Diagnosis::SuspekDbd,
            Severity::Observasi,
        ),
    ])
    .expect("scenario store is valid")
}

/// A small mixed store with literal symptom vectors
#[must_use]
pub fn clinic_store() -> CaseStore {
    use Symptom::*;
    CaseStore::build(vec![
        case(
            "DBD_001",
            &[
                HighFever,
                Headache,
                JointPain,
                MusclePain,
                Petechiae,
                LowPlatelet,
                RetroOrbitalPain,
            ],
            Diagnosis::DbdPositif,
            Severity::Sedang,
        ),
        case(
            "DBD_002",
            &[
                HighFever,
                Headache,
                JointPain,
                Petechiae,
                Epistaxis,
                GumBleeding,
                LowPlatelet,
                Hepatomegaly,
            ],
            Diagnosis::DbdPositif,
            Severity::Berat,
        ),
        case(
            "DBD_003",
            &[HighFever, MusclePain, Rash, Petechiae, LowPlatelet],
            Diagnosis::DbdPositif,
            Severity::Ringan,
        ),
        case(
            "SUS_001",
            &[HighFever, Headache, JointPain, Lethargy],
            Diagnosis::SuspekDbd,
            Severity::Observasi,
        ),
        case(
            "SUS_002",
            &[HighFever, Headache, NauseaVomiting, Anorexia, Lethargy],
            Diagnosis::SuspekDbd,
            Severity::Observasi,
        ),
        case(
            "NEG_001",
            &[Headache, NauseaVomiting, Lethargy],
            Diagnosis::BukanDbd,
            Severity::NonDbd,
        ),
        case(
            "NEG_002",
            &[HighFever, Headache, Anorexia],
            Diagnosis::BukanDbd,
            Severity::NonDbd,
        ),
    ])
    .expect("clinic store is valid")
}

/// A path named `name` inside a fresh temporary directory.
///
/// The directory and everything in it is removed when the returned
/// `TempDir` is dropped.
#[must_use]
pub fn temp_path(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temporary directory can be created");
    let path = dir.path().join(name);
    (dir, path)
}
