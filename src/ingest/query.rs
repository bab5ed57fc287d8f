//! Query submissions
//!
//! A submission is a JSON object with optional patient identity, a symptom
//! map and an optional lab-flag map:
//!
//! ```json
//! { "patient": { "name": "Anonymous", "age": 25, "gender": "female" },
//!   "symptoms": { "demam_tinggi": 1, "sakit_kepala": 1 },
//!   "labs": { "leukosit_rendah": 1 } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::models::QueryCase;

/// Identity shown on the report; never used for reasoning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            age: None,
            gender: None,
        }
    }
}

/// One submitted query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySubmission {
    #[serde(default)]
    pub patient: Option<PatientInfo>,
    #[serde(default)]
    pub symptoms: HashMap<String, i64>,
    #[serde(default)]
    pub labs: Option<HashMap<String, i64>>,
}

impl QuerySubmission {
    /// Parse a submission from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a submission from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "reading query")?;
        Self::from_json(&content)
    }

    /// Build the query case.
    ///
    /// Lab flags are taken from `labs` when given, otherwise from any lab
    /// keys mixed into `symptoms`.
    #[must_use]
    pub fn to_query(&self) -> QueryCase {
        let mut values = self.symptoms.clone();
        if let Some(labs) = &self.labs {
            values.extend(labs.iter().map(|(k, v)| (k.clone(), *v)));
        }
        QueryCase::from_flag_map(&values)
    }

    /// Patient identity, defaulting to an anonymous patient
    #[must_use]
    pub fn patient(&self) -> PatientInfo {
        self.patient.clone().unwrap_or_default()
    }
}
