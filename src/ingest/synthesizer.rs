//! Turning hematology records into cases
//!
//! Hematology datasets have lab values and a test result but no symptom
//! checklist. A `CaseSynthesizer` derives the symptom flags, labels and
//! optional lab flags for each row. Two strategies are provided:
//!
//! - `ThresholdSynthesizer` derives every flag from fixed lab thresholds
//! - `SampledSynthesizer` derives the lab-driven flags from thresholds and
//!   samples the remaining symptoms from a seeded random generator

use log::info;
use rand::prelude::*;

use crate::ingest::lab_record::LabRecord;
use crate::models::{
    Case, Diagnosis, LabFlag, LabFlags, LabValues, Severity, Symptom, SymptomFlags,
};
use crate::utils::logging::{create_row_progress_bar, finish_progress_bar};

/// Strategy for deriving a case from one hematology record
pub trait CaseSynthesizer {
    /// Short strategy name for logs
    fn name(&self) -> &'static str;

    /// Derive the case for the record at position `row`
    fn synthesize(&mut self, row: usize, record: &LabRecord) -> Case;
}

/// Run a synthesizer over every record, in order
pub fn synthesize_cases(records: &[LabRecord], synthesizer: &mut dyn CaseSynthesizer) -> Vec<Case> {
    info!(
        "Synthesizing {} cases with the {} strategy",
        records.len(),
        synthesizer.name()
    );

    let pb = create_row_progress_bar(records.len(), Some("Synthesizing cases"));
    let cases = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            pb.inc(1);
            synthesizer.synthesize(row, record)
        })
        .collect();
    finish_progress_bar(&pb, Some("Synthesis complete"));

    cases
}

fn lab_flags(record: &LabRecord) -> LabFlags {
    LabFlags::new()
        .with(LabFlag::HighHematocrit, record.high_hematocrit())
        .with(LabFlag::LowLeukocyte, record.low_leukocyte())
        .with(LabFlag::LowHemoglobin, record.low_hemoglobin())
}

fn lab_values(record: &LabRecord) -> LabValues {
    LabValues {
        platelet: Some(record.platelet),
        hematocrit: Some(record.hematocrit),
        wbc: Some(record.wbc),
        hemoglobin: Some(record.hemoglobin),
        age: record.age.map(|age| age.round().max(0.0) as u32),
        gender: Some(record.gender.trim().to_lowercase()),
    }
}

/// Derives every flag deterministically from lab thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdSynthesizer {
    with_lab_flags: bool,
}

impl ThresholdSynthesizer {
    /// Create a synthesizer that produces symptom-only cases
    #[must_use]
    pub const fn new() -> Self {
        Self {
            with_lab_flags: false,
        }
    }

    /// Also attach the three lab flags to every case
    #[must_use]
    pub const fn with_lab_flags(mut self, enabled: bool) -> Self {
        self.with_lab_flags = enabled;
        self
    }

    fn positive(record: &LabRecord) -> (SymptomFlags, Severity) {
        let platelet = record.platelet;
        let mut symptoms = SymptomFlags::from_present([
            Symptom::HighFever,
            Symptom::Headache,
            Symptom::JointPain,
            Symptom::MusclePain,
            Symptom::Lethargy,
            Symptom::Anorexia,
            Symptom::RetroOrbitalPain,
        ]);

        let severity = if platelet < 50_000.0 {
            for symptom in [
                Symptom::Petechiae,
                Symptom::NauseaVomiting,
                Symptom::AbdominalPain,
                Symptom::Rash,
                Symptom::LowPlatelet,
            ] {
                symptoms.set(symptom, true);
            }
            symptoms.set(Symptom::Epistaxis, platelet < 30_000.0);
            symptoms.set(Symptom::GumBleeding, platelet < 30_000.0);
            symptoms.set(Symptom::Hepatomegaly, record.hematocrit > 45.0);
            if platelet < 20_000.0 {
                Severity::Berat
            } else {
                Severity::Sedang
            }
        } else if platelet < 100_000.0 {
            for symptom in [Symptom::Petechiae, Symptom::Rash, Symptom::LowPlatelet] {
                symptoms.set(symptom, true);
            }
            symptoms.set(Symptom::NauseaVomiting, platelet < 70_000.0);
            if platelet < 70_000.0 {
                Severity::Sedang
            } else {
                Severity::Ringan
            }
        } else {
            Severity::Ringan
        };

        (symptoms, severity)
    }

    fn negative(record: &LabRecord) -> SymptomFlags {
        let low_wbc = record.wbc < 5_000.0;
        SymptomFlags::new()
            .with(Symptom::HighFever, low_wbc)
            .with(Symptom::JointPain, low_wbc)
            .with(Symptom::MusclePain, low_wbc)
            .with(Symptom::Headache, record.hemoglobin < 12.0)
            .with(Symptom::Lethargy, record.hemoglobin < 11.0)
            .with(Symptom::Anorexia, record.hemoglobin < 10.0)
    }
}

impl CaseSynthesizer for ThresholdSynthesizer {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn synthesize(&mut self, row: usize, record: &LabRecord) -> Case {
        let case_id = format!("CSV_{:04}", row + 1);
        let mut case = if record.is_positive() {
            let (symptoms, severity) = Self::positive(record);
            Case::new(case_id, symptoms, Diagnosis::DbdPositif, severity)
        } else {
            Case::new(
                case_id,
                Self::negative(record),
                Diagnosis::BukanDbd,
                Severity::NonDbd,
            )
        };

        if self.with_lab_flags {
            case = case.with_lab_flags(lab_flags(record));
        }
        case.with_lab_values(lab_values(record))
    }
}

/// Derives lab-driven flags from thresholds and samples the rest
#[derive(Debug, Clone)]
pub struct SampledSynthesizer {
    rng: StdRng,
}

impl SampledSynthesizer {
    /// Create a synthesizer with a fixed seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sample(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    fn severity(record: &LabRecord) -> Severity {
        let (platelet, hct) = (record.platelet, record.hematocrit);
        if platelet < 20_000.0 || (hct > 50.0 && platelet < 50_000.0) {
            Severity::Berat
        } else if platelet < 50_000.0 || (hct > 45.0 && platelet < 100_000.0) {
            Severity::Sedang
        } else {
            Severity::Ringan
        }
    }
}

impl CaseSynthesizer for SampledSynthesizer {
    fn name(&self) -> &'static str {
        "sampled"
    }

    fn synthesize(&mut self, row: usize, record: &LabRecord) -> Case {
        let labs = lab_flags(record);
        let platelet = record.platelet;

        let mut symptoms = SymptomFlags::new()
            .with(Symptom::HighFever, true)
            .with(Symptom::LowPlatelet, record.low_platelet())
            .with(Symptom::Petechiae, platelet < 50_000.0)
            .with(Symptom::Epistaxis, platelet < 30_000.0)
            .with(Symptom::GumBleeding, platelet < 30_000.0);

        if labs.get(LabFlag::HighHematocrit) && record.low_platelet() {
            for symptom in [
                Symptom::JointPain,
                Symptom::MusclePain,
                Symptom::Headache,
                Symptom::RetroOrbitalPain,
            ] {
                symptoms.set(symptom, true);
            }
        } else {
            symptoms.set(Symptom::JointPain, self.sample(0.4));
            symptoms.set(Symptom::MusclePain, self.sample(0.4));
            symptoms.set(Symptom::Headache, self.sample(0.5));
            symptoms.set(Symptom::RetroOrbitalPain, self.sample(0.3));
        }

        let lethargy = record.hemoglobin < 11.0 || self.sample(0.7);
        symptoms.set(Symptom::Lethargy, lethargy);
        symptoms.set(Symptom::NauseaVomiting, self.sample(0.5));
        symptoms.set(Symptom::AbdominalPain, self.sample(0.4));
        symptoms.set(Symptom::Rash, self.sample(0.4));
        symptoms.set(Symptom::Anorexia, self.sample(0.6));

        let hepatomegaly = (platelet < 50_000.0 && record.hematocrit > 45.0) || self.sample(0.3);
        symptoms.set(Symptom::Hepatomegaly, hepatomegaly);

        let (diagnosis, severity) = if record.is_positive() {
            (Diagnosis::DbdPositif, Self::severity(record))
        } else {
            (Diagnosis::BukanDbd, Severity::NonDbd)
        };

        Case::new(format!("CSV_{:03}", row + 1), symptoms, diagnosis, severity)
            .with_lab_flags(labs)
            .with_lab_values(lab_values(record))
    }
}
