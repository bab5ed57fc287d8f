//! Similarity weight profiles
//!
//! A `SimilarityProfile` bundles the symptom weights and, for lab-aware case
//! bases, the lab-flag weights. The same scoring routine runs for both
//! kinds; only the profile differs.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

use crate::collections::CaseStore;
use crate::config::MAX_FLAG_WEIGHT;
use crate::error::{CbrError, Result};
use crate::models::{FlagKey, LAB_FLAG_COUNT, LabFlag, SYMPTOM_COUNT, Symptom};

/// Where a profile's weights came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Built-in weights for case bases without lab flags
    SymptomsOnly,
    /// Built-in weights for case bases with lab flags
    LabAware,
    /// Weights supplied by the caller
    Custom,
}

/// Weight tables used by the similarity engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityProfile {
    kind: ProfileKind,
    symptom_weights: [f64; SYMPTOM_COUNT],
    lab_weights: Option<[f64; LAB_FLAG_COUNT]>,
}

impl SimilarityProfile {
    /// Built-in profile for symptom-only case bases (weights sum to 1.0)
    #[must_use]
    pub const fn symptoms_only() -> Self {
        Self {
            kind: ProfileKind::SymptomsOnly,
            // Canonical symptom order, see `Symptom::ALL`
            symptom_weights: [
                0.12, // high fever
                0.05, // headache
                0.08, // joint pain
                0.08, // muscle pain
                0.03, // nausea/vomiting
                0.04, // rash
                0.04, // abdominal pain
                0.09, // epistaxis
                0.09, // gum bleeding
                0.10, // petechiae
                0.02, // lethargy
                0.01, // anorexia
                0.07, // retro-orbital pain
                0.06, // hepatomegaly
                0.12, // low platelet
            ],
            lab_weights: None,
        }
    }

    /// Built-in profile for lab-aware case bases (0.7 symptoms + 0.3 labs)
    #[must_use]
    pub const fn lab_aware() -> Self {
        Self {
            kind: ProfileKind::LabAware,
            symptom_weights: [
                0.08, // high fever
                0.03, // headache
                0.05, // joint pain
                0.05, // muscle pain
                0.02, // nausea/vomiting
                0.03, // rash
                0.03, // abdominal pain
                0.06, // epistaxis
                0.06, // gum bleeding
                0.08, // petechiae
                0.01, // lethargy
                0.01, // anorexia
                0.05, // retro-orbital pain
                0.04, // hepatomegaly
                0.10, // low platelet
            ],
            lab_weights: Some([
                0.12, // high hematocrit
                0.10, // low leukocyte
                0.08, // low hemoglobin
            ]),
        }
    }

    /// The built-in profile matching the store's lab awareness
    #[must_use]
    pub fn for_store(store: &CaseStore) -> Self {
        if store.is_lab_aware() {
            Self::lab_aware()
        } else {
            Self::symptoms_only()
        }
    }

    /// Build a custom profile from named weight tables.
    ///
    /// Every canonical key must be present exactly once and no other key is
    /// accepted. Each weight must lie between 0 and `MAX_FLAG_WEIGHT`.
    pub fn from_tables(
        symptom_weights: &HashMap<String, f64>,
        lab_weights: Option<&HashMap<String, f64>>,
    ) -> Result<Self> {
        let symptom_weights = weight_table::<Symptom, SYMPTOM_COUNT>("symptom", symptom_weights)?;
        let lab_weights = lab_weights
            .map(|table| weight_table::<LabFlag, LAB_FLAG_COUNT>("lab", table))
            .transpose()?;

        Ok(Self {
            kind: ProfileKind::Custom,
            symptom_weights,
            lab_weights,
        })
    }

    /// Where this profile came from
    #[must_use]
    pub const fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Short display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind {
            ProfileKind::SymptomsOnly => "symptoms-only",
            ProfileKind::LabAware => "lab-aware",
            ProfileKind::Custom => "custom",
        }
    }

    /// Whether lab flags take part in the distance
    #[must_use]
    pub const fn is_lab_aware(&self) -> bool {
        self.lab_weights.is_some()
    }

    /// Weight of one symptom
    #[must_use]
    pub fn symptom_weight(&self, symptom: Symptom) -> f64 {
        self.symptom_weights[symptom.index()]
    }

    /// Weight of one lab flag, if the profile is lab-aware
    #[must_use]
    pub fn lab_weight(&self, flag: LabFlag) -> Option<f64> {
        self.lab_weights.map(|weights| weights[flag.index()])
    }

    /// Sum of all weights in the profile
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        let symptoms: f64 = self.symptom_weights.iter().sum();
        let labs: f64 = self.lab_weights.map_or(0.0, |weights| weights.iter().sum());
        symptoms + labs
    }

    /// Whether the weights sum to 1.0 within `tolerance`
    #[must_use]
    pub fn validate_normalization(&self, tolerance: f64) -> bool {
        (self.total_weight() - 1.0).abs() <= tolerance
    }
}

impl fmt::Display for SimilarityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Similarity profile ({}):", self.name())?;
        let ranked = Symptom::ALL
            .iter()
            .sorted_by(|a, b| {
                self.symptom_weight(**b)
                    .total_cmp(&self.symptom_weight(**a))
            })
            .map(|s| format!("{}={:.2}", s.key(), self.symptom_weight(*s)))
            .join(", ");
        writeln!(f, "  Symptoms: {ranked}")?;
        if self.is_lab_aware() {
            let labs = LabFlag::ALL
                .iter()
                .map(|l| format!("{}={:.2}", l.key(), self.lab_weight(*l).unwrap_or_default()))
                .join(", ");
            writeln!(f, "  Labs: {labs}")?;
        }
        write!(f, "  Total weight: {:.4}", self.total_weight())
    }
}

fn weight_table<K: FlagKey, const N: usize>(
    table_name: &str,
    table: &HashMap<String, f64>,
) -> Result<[f64; N]> {
    if let Some(unknown) = table.keys().sorted().find(|key| K::from_key(key).is_none()) {
        return Err(CbrError::configuration(format!(
            "Unknown key '{unknown}' in {table_name} weight table"
        )));
    }

    let mut weights = [0.0; N];
    for &key in K::ALL {
        let weight = *table.get(key.key()).ok_or_else(|| {
            CbrError::configuration(format!(
                "Missing key '{}' in {table_name} weight table",
                key.key()
            ))
        })?;
        if !(0.0..=MAX_FLAG_WEIGHT).contains(&weight) {
            return Err(CbrError::configuration(format!(
                "Weight for '{}' must be between 0 and {MAX_FLAG_WEIGHT}, got {weight}",
                key.key()
            )));
        }
        weights[key.index()] = weight;
    }
    Ok(weights)
}
