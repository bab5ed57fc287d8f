//! Flat on-disk case records
//!
//! `CaseRecord` mirrors one row of a case-base file: identity, labels, one
//! column per symptom and lab flag, and the optional raw lab values. The
//! same struct is read from JSON and, through `serde_arrow`, from Parquet.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CbrError, Result};
use crate::models::{
    Case, Diagnosis, FlagKey, LabFlag, LabFlags, LabValues, Severity, Symptom, SymptomFlags,
};

/// One row of a normalized case-base file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: Option<String>,
    pub diagnosis: Option<String>,
    pub severity: Option<String>,

    pub demam_tinggi: Option<i64>,
    pub sakit_kepala: Option<i64>,
    pub nyeri_sendi: Option<i64>,
    pub nyeri_otot: Option<i64>,
    pub mual_muntah: Option<i64>,
    pub ruam_kulit: Option<i64>,
    pub nyeri_perut: Option<i64>,
    pub mimisan: Option<i64>,
    pub gusi_berdarah: Option<i64>,
    pub bintik_merah: Option<i64>,
    pub lemah_lesu: Option<i64>,
    pub kehilangan_nafsu_makan: Option<i64>,
    pub nyeri_belakang_mata: Option<i64>,
    pub pembesaran_hati: Option<i64>,
    pub trombosit_rendah: Option<i64>,

    pub hematokrit_tinggi: Option<i64>,
    pub leukosit_rendah: Option<i64>,
    pub hemoglobin_rendah: Option<i64>,

    pub platelet: Option<f64>,
    pub hematokrit: Option<f64>,
    pub wbc: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl CaseRecord {
    fn symptom_column(&self, symptom: Symptom) -> Option<i64> {
        match symptom {
            Symptom::HighFever => self.demam_tinggi,
            Symptom::Headache => self.sakit_kepala,
            Symptom::JointPain => self.nyeri_sendi,
            Symptom::MusclePain => self.nyeri_otot,
            Symptom::NauseaVomiting => self.mual_muntah,
            Symptom::Rash => self.ruam_kulit,
            Symptom::AbdominalPain => self.nyeri_perut,
            Symptom::Epistaxis => self.mimisan,
            Symptom::GumBleeding => self.gusi_berdarah,
            Symptom::Petechiae => self.bintik_merah,
            Symptom::Lethargy => self.lemah_lesu,
            Symptom::Anorexia => self.kehilangan_nafsu_makan,
            Symptom::RetroOrbitalPain => self.nyeri_belakang_mata,
            Symptom::Hepatomegaly => self.pembesaran_hati,
            Symptom::LowPlatelet => self.trombosit_rendah,
        }
    }

    fn symptom_column_mut(&mut self, symptom: Symptom) -> &mut Option<i64> {
        match symptom {
            Symptom::HighFever => &mut self.demam_tinggi,
            Symptom::Headache => &mut self.sakit_kepala,
            Symptom::JointPain => &mut self.nyeri_sendi,
            Symptom::MusclePain => &mut self.nyeri_otot,
            Symptom::NauseaVomiting => &mut self.mual_muntah,
            Symptom::Rash => &mut self.ruam_kulit,
            Symptom::AbdominalPain => &mut self.nyeri_perut,
            Symptom::Epistaxis => &mut self.mimisan,
            Symptom::GumBleeding => &mut self.gusi_berdarah,
            Symptom::Petechiae => &mut self.bintik_merah,
            Symptom::Lethargy => &mut self.lemah_lesu,
            Symptom::Anorexia => &mut self.kehilangan_nafsu_makan,
            Symptom::RetroOrbitalPain => &mut self.nyeri_belakang_mata,
            Symptom::Hepatomegaly => &mut self.pembesaran_hati,
            Symptom::LowPlatelet => &mut self.trombosit_rendah,
        }
    }

    fn lab_column(&self, flag: LabFlag) -> Option<i64> {
        match flag {
            LabFlag::HighHematocrit => self.hematokrit_tinggi,
            LabFlag::LowLeukocyte => self.leukosit_rendah,
            LabFlag::LowHemoglobin => self.hemoglobin_rendah,
        }
    }

    fn lab_column_mut(&mut self, flag: LabFlag) -> &mut Option<i64> {
        match flag {
            LabFlag::HighHematocrit => &mut self.hematokrit_tinggi,
            LabFlag::LowLeukocyte => &mut self.leukosit_rendah,
            LabFlag::LowHemoglobin => &mut self.hemoglobin_rendah,
        }
    }

    fn has_lab_values(&self) -> bool {
        self.platelet.is_some()
            || self.hematokrit.is_some()
            || self.wbc.is_some()
            || self.hemoglobin.is_some()
            || self.age.is_some()
            || self.gender.is_some()
    }

    /// Validate and convert into a `Case`.
    ///
    /// `row` is used to name the record when its `case_id` is missing.
    pub fn into_case(self, row: usize) -> Result<Case> {
        let case_id = match self.case_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(CbrError::schema_violation(
                    format!("row {row}"),
                    "missing case_id",
                ));
            }
        };

        let diagnosis = self
            .diagnosis
            .as_deref()
            .ok_or_else(|| CbrError::schema_violation(&case_id, "missing diagnosis"))?
            .parse::<Diagnosis>()
            .map_err(|e| CbrError::schema_violation(&case_id, e.to_string()))?;

        let severity = self
            .severity
            .as_deref()
            .ok_or_else(|| CbrError::schema_violation(&case_id, "missing severity"))?
            .parse::<Severity>()
            .map_err(|e| CbrError::schema_violation(&case_id, e.to_string()))?;

        let symptom_values: HashMap<String, i64> = Symptom::ALL
            .iter()
            .filter_map(|&s| self.symptom_column(s).map(|v| (s.key().to_string(), v)))
            .collect();
        let symptoms = SymptomFlags::from_record_map(&case_id, &symptom_values)?;

        let lab_values: HashMap<String, i64> = LabFlag::ALL
            .iter()
            .filter_map(|&l| self.lab_column(l).map(|v| (l.key().to_string(), v)))
            .collect();
        let lab_flags = if lab_values.is_empty() {
            None
        } else {
            Some(LabFlags::from_record_map(&case_id, &lab_values)?)
        };

        let mut case = Case::new(case_id, symptoms, diagnosis, severity);
        case.lab_flags = lab_flags;
        if self.has_lab_values() {
            case = case.with_lab_values(LabValues {
                platelet: self.platelet,
                hematocrit: self.hematokrit,
                wbc: self.wbc,
                hemoglobin: self.hemoglobin,
                age: self.age,
                gender: self.gender,
            });
        }
        Ok(case)
    }
}

impl From<&Case> for CaseRecord {
    fn from(case: &Case) -> Self {
        let mut record = Self {
            case_id: Some(case.case_id.clone()),
            diagnosis: Some(case.diagnosis.code().to_string()),
            severity: Some(case.severity.code().to_string()),
            ..Self::default()
        };

        for (symptom, _) in case.symptoms.iter() {
            *record.symptom_column_mut(symptom) = Some(i64::from(case.symptoms.value(symptom)));
        }
        if let Some(labs) = &case.lab_flags {
            for (flag, _) in labs.iter() {
                *record.lab_column_mut(flag) = Some(i64::from(labs.value(flag)));
            }
        }
        if let Some(values) = &case.lab_values {
            record.platelet = values.platelet;
            record.hematokrit = values.hematocrit;
            record.wbc = values.wbc;
            record.hemoglobin = values.hemoglobin;
            record.age = values.age;
            record.gender.clone_from(&values.gender);
        }
        record
    }
}
