//! Case records
//!
//! A `Case` is one historical patient record with ground-truth labels. A
//! `QueryCase` is the ephemeral record built from one user submission.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CbrError, Result};
use crate::models::diagnosis::{Diagnosis, Severity};
use crate::models::symptom::{FlagKey, LabFlag, LabFlags, Symptom, SymptomFlags};
use crate::models::traits::EntityModel;

/// Raw hematology values kept alongside a case for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabValues {
    /// Platelet count (/μL)
    pub platelet: Option<f64>,
    /// Hematocrit (%)
    pub hematocrit: Option<f64>,
    /// White blood cell count (/μL)
    pub wbc: Option<f64>,
    /// Hemoglobin (g/dl)
    pub hemoglobin: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Recorded gender
    pub gender: Option<String>,
}

/// A historical case in the case base
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    /// Unique identifier
    pub case_id: String,
    /// Clinical symptom flags
    pub symptoms: SymptomFlags,
    /// Lab-derived flags, present only in lab-aware case bases
    pub lab_flags: Option<LabFlags>,
    /// Ground-truth diagnosis
    pub diagnosis: Diagnosis,
    /// Ground-truth severity
    pub severity: Severity,
    /// Optional raw lab values (never read by the reasoning core)
    pub lab_values: Option<LabValues>,
}

impl Case {
    /// Create a new case without lab information
    #[must_use]
    pub fn new(
        case_id: impl Into<String>,
        symptoms: SymptomFlags,
        diagnosis: Diagnosis,
        severity: Severity,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            symptoms,
            lab_flags: None,
            diagnosis,
            severity,
            lab_values: None,
        }
    }

    /// Attach lab-derived flags
    #[must_use]
    pub fn with_lab_flags(mut self, lab_flags: LabFlags) -> Self {
        self.lab_flags = Some(lab_flags);
        self
    }

    /// Attach raw lab values
    #[must_use]
    pub fn with_lab_values(mut self, lab_values: LabValues) -> Self {
        self.lab_values = Some(lab_values);
        self
    }

    /// Check the record against the normalized case schema
    pub fn validate(&self) -> Result<()> {
        if self.case_id.trim().is_empty() {
            return Err(CbrError::schema_violation(
                "<empty>",
                "case_id must not be empty",
            ));
        }

        if !self.severity.is_case_label() {
            return Err(CbrError::schema_violation(
                &self.case_id,
                format!("severity {} is not valid on a stored case", self.severity),
            ));
        }

        if !self.diagnosis.admits(self.severity) {
            return Err(CbrError::schema_violation(
                &self.case_id,
                format!(
                    "severity {} is inconsistent with diagnosis {}",
                    self.severity, self.diagnosis
                ),
            ));
        }

        Ok(())
    }
}

impl EntityModel for Case {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.case_id
    }
}

/// A query built from one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryCase {
    /// Reported symptoms
    pub symptoms: SymptomFlags,
    /// Lab-derived flags, if the submission included them
    pub lab_flags: Option<LabFlags>,
}

impl QueryCase {
    /// Create a query from symptom flags only
    #[must_use]
    pub const fn new(symptoms: SymptomFlags) -> Self {
        Self {
            symptoms,
            lab_flags: None,
        }
    }

    /// Create a query from the reported symptoms
    #[must_use]
    pub fn from_symptoms(present: impl IntoIterator<Item = Symptom>) -> Self {
        Self::new(SymptomFlags::from_present(present))
    }

    /// Create a query from a name→0/1 map.
    ///
    /// Missing symptom keys default to 0. Lab flags are attached when at least
    /// one lab key is present, with missing lab keys defaulting to 0.
    #[must_use]
    pub fn from_flag_map(values: &HashMap<String, i64>) -> Self {
        let symptoms = SymptomFlags::from_flag_map(values);
        let has_lab_keys = LabFlag::ALL
            .iter()
            .any(|flag| values.contains_key(flag.key()));
        let lab_flags = has_lab_keys.then(|| LabFlags::from_flag_map(values));

        Self {
            symptoms,
            lab_flags,
        }
    }

    /// Attach lab-derived flags
    #[must_use]
    pub fn with_lab_flags(mut self, lab_flags: LabFlags) -> Self {
        self.lab_flags = Some(lab_flags);
        self
    }

    /// Number of reported symptoms (lab flags are not counted)
    #[must_use]
    pub fn total_symptom_count(&self) -> usize {
        self.symptoms.count()
    }
}
