//! Static care recommendations per verdict and severity
//!
//! The tables are advisory text only. They never feed back into the
//! reasoning cycle.

use serde::Serialize;

use crate::models::{Severity, Verdict};

/// Grouped recommendation text for one verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    /// What to do right away
    pub immediate_actions: Vec<&'static str>,
    /// Suggested laboratory work-up
    pub lab_tests: Vec<&'static str>,
    /// Treatment guidance
    pub treatment: Vec<&'static str>,
    /// Signs to watch for
    pub monitoring: Vec<&'static str>,
    /// Mosquito-control advice, given for every verdict
    pub prevention: Vec<&'static str>,
}

impl Recommendations {
    /// Every line across all sections
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.immediate_actions
            .iter()
            .chain(&self.lab_tests)
            .chain(&self.treatment)
            .chain(&self.monitoring)
            .chain(&self.prevention)
            .copied()
    }
}

const POSITIVE_ACTIONS: &[&str] = &[
    "Take the patient to the nearest health facility immediately",
    "Give plenty of oral fluids (water, oral rehydration salts, fruit juice)",
    "Check body temperature every 2-4 hours",
    "Watch for bleeding (nosebleed, gum bleeding, black stools)",
];

const POSITIVE_LABS: &[&str] = &[
    "Platelet count (every 4-6 hours if below 100,000/uL)",
    "Hematocrit to detect hemoconcentration",
    "NS1 antigen or dengue IgM/IgG test",
    "Liver function (SGOT/SGPT)",
    "Electrolytes and kidney function",
];

const SEVERE_TREATMENT: &[&str] = &[
    "Admit to hospital immediately (risk of dengue shock syndrome)",
    "Crystalloid infusion (Ringer's lactate or 0.9% NaCl)",
    "Platelet transfusion if below 20,000/uL with bleeding",
    "Close monitoring in intensive care if needed",
];

const MODERATE_TREATMENT: &[&str] = &[
    "Admit or observe for 24 hours",
    "Paracetamol for fever (avoid aspirin and ibuprofen)",
    "Aggressive oral rehydration, 2-3 L per day",
    "Check vital signs every 4 hours",
];

const MILD_TREATMENT: &[&str] = &[
    "Outpatient care with close follow-up",
    "Paracetamol 500 mg three times a day for fever",
    "Drink at least 2.5 L of fluid per day",
    "See a doctor every day",
];

const POSITIVE_MONITORING: &[&str] = &[
    "Warning signs to watch for:",
    "Severe, persistent abdominal pain",
    "Persistent vomiting",
    "Mucosal bleeding (nose, gums)",
    "Restlessness or lethargy",
    "Liver enlargement over 2 cm",
    "Sharp platelet drop together with rising hematocrit",
];

const SUSPECT_ACTIONS: &[&str] = &[
    "Visit a doctor or community health centre for a full examination",
    "Increase fluid intake",
    "Monitor body temperature",
    "Keep a record of how the symptoms develop",
];

const SUSPECT_LABS: &[&str] = &[
    "Complete blood count",
    "NS1 antigen or rapid dengue test",
    "Platelet count and hematocrit",
];

const SUSPECT_TREATMENT: &[&str] = &[
    "Paracetamol for fever (avoid NSAIDs)",
    "Drink 8-10 glasses of water a day",
    "Full bed rest",
    "Follow up again in 24-48 hours",
];

const SUSPECT_MONITORING: &[&str] = &[
    "Watch how the symptoms develop:",
    "Fever lasting more than 3 days: get re-examined",
    "Any sign of bleeding: go to hospital at once",
    "Worsening condition: do not delay going to hospital",
];

const NEGATIVE_ACTIONS: &[&str] = &[
    "Most likely not dengue hemorrhagic fever",
    "Still consult a doctor for a definitive diagnosis",
    "Rest well and drink plenty of water",
    "Monitor body temperature",
];

const NEGATIVE_LABS: &[&str] = &[
    "Routine blood test if fever lasts more than 3 days",
    "Diagnostic tests for other diseases (typhoid, malaria, etc.)",
];

const NEGATIVE_TREATMENT: &[&str] = &[
    "Symptomatic medication as needed",
    "Get enough rest",
    "Balanced nutrition",
];

const INSUFFICIENT_ACTIONS: &[&str] = &[
    "Too few symptoms were reported to compare against the case base",
    "Re-assess the patient and record every symptom present",
    "Consult a doctor if the complaints continue",
];

const INSUFFICIENT_LABS: &[&str] = &["Complete blood count if fever persists for more than 2 days"];

const INSUFFICIENT_MONITORING: &[&str] = &[
    "Record new symptoms as they appear and run the assessment again",
];

const PREVENTION: &[&str] = &[
    "Practise 3M Plus:",
    "Drain water containers once a week",
    "Cover water containers tightly",
    "Recycle used items that can hold water",
    "Plus: use mosquito repellent, fit window screens, and similar measures",
    "Fog the neighbourhood when dengue cases occur in the area",
    "Wear covering clothing during outdoor activities",
];

/// Look up the recommendations for a verdict and severity
#[must_use]
pub fn recommend(verdict: Verdict, severity: Severity) -> Recommendations {
    let (immediate_actions, lab_tests, treatment, monitoring): (
        &[&str],
        &[&str],
        &[&str],
        &[&str],
    ) = match verdict {
        Verdict::DbdPositif => {
            let treatment = match severity {
                Severity::Berat => SEVERE_TREATMENT,
                Severity::Sedang => MODERATE_TREATMENT,
                _ => MILD_TREATMENT,
            };
            (POSITIVE_ACTIONS, POSITIVE_LABS, treatment, POSITIVE_MONITORING)
        }
        Verdict::SuspekDbd => (
            SUSPECT_ACTIONS,
            SUSPECT_LABS,
            SUSPECT_TREATMENT,
            SUSPECT_MONITORING,
        ),
        Verdict::BukanDbd => (NEGATIVE_ACTIONS, NEGATIVE_LABS, NEGATIVE_TREATMENT, &[]),
        Verdict::DataInsufficient => (
            INSUFFICIENT_ACTIONS,
            INSUFFICIENT_LABS,
            &[],
            INSUFFICIENT_MONITORING,
        ),
    };

    Recommendations {
        immediate_actions: immediate_actions.to_vec(),
        lab_tests: lab_tests.to_vec(),
        treatment: treatment.to_vec(),
        monitoring: monitoring.to_vec(),
        prevention: PREVENTION.to_vec(),
    }
}
