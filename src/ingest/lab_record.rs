//! Raw hematology records
//!
//! Rows of a hematology dataset as exported from the laboratory system. They
//! carry no symptom checklist; a `CaseSynthesizer` turns them into cases.

use serde::{Deserialize, Serialize};

/// Hematocrit above which a male patient is hemoconcentrated (%)
pub const MALE_HEMATOCRIT_LIMIT: f64 = 54.0;

/// Hematocrit above which a female patient is hemoconcentrated (%)
pub const FEMALE_HEMATOCRIT_LIMIT: f64 = 47.0;

/// WBC count below which leukopenia is flagged (/μL)
pub const LEUKOPENIA_LIMIT: f64 = 4_000.0;

/// Hemoglobin below which the low-hemoglobin flag is set (g/dl)
pub const LOW_HEMOGLOBIN_LIMIT: f64 = 12.0;

/// Platelet count below which thrombocytopenia is flagged (/μL)
pub const LOW_PLATELET_LIMIT: f64 = 100_000.0;

/// One row of a hematology dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Hemoglobin(g/dl)")]
    pub hemoglobin: f64,
    #[serde(rename = "Neutrophils(%)")]
    pub neutrophils: Option<f64>,
    #[serde(rename = "Lymphocytes(%)")]
    pub lymphocytes: Option<f64>,
    #[serde(rename = "HCT(%)")]
    pub hematocrit: f64,
    #[serde(rename = "Total Platelet Count(/cumm)")]
    pub platelet: f64,
    #[serde(rename = "Total WBC count(/cumm)")]
    pub wbc: f64,
    /// `positive` or `negative`
    #[serde(rename = "Result")]
    pub result: String,
}

impl LabRecord {
    /// Whether the laboratory result is dengue-positive
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.result.trim().eq_ignore_ascii_case("positive")
    }

    /// Whether the record is for a male patient
    #[must_use]
    pub fn is_male(&self) -> bool {
        self.gender.trim().eq_ignore_ascii_case("male")
    }

    /// Hematocrit above the sex-specific range
    #[must_use]
    pub fn high_hematocrit(&self) -> bool {
        let limit = if self.is_male() {
            MALE_HEMATOCRIT_LIMIT
        } else {
            FEMALE_HEMATOCRIT_LIMIT
        };
        self.hematocrit > limit
    }

    /// WBC count below the normal range
    #[must_use]
    pub fn low_leukocyte(&self) -> bool {
        self.wbc < LEUKOPENIA_LIMIT
    }

    /// Hemoglobin below 12 g/dl
    #[must_use]
    pub fn low_hemoglobin(&self) -> bool {
        self.hemoglobin < LOW_HEMOGLOBIN_LIMIT
    }

    /// Platelet count below 100,000/μL
    #[must_use]
    pub fn low_platelet(&self) -> bool {
        self.platelet < LOW_PLATELET_LIMIT
    }
}
