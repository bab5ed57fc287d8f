//! Seeded simulated case base
//!
//! Used when no case-base file is supplied. Produces 40 positive, 30 suspect
//! and 20 negative cases whose symptoms are drawn with per-group
//! probabilities.

use log::info;
use rand::prelude::*;

use crate::models::{Case, Diagnosis, FlagKey, SYMPTOM_COUNT, Severity, Symptom, SymptomFlags};

/// Number of simulated positive cases
pub const SIMULATED_POSITIVE: usize = 40;

/// Number of simulated suspect cases
pub const SIMULATED_SUSPECT: usize = 30;

/// Number of simulated negative cases
pub const SIMULATED_NEGATIVE: usize = 20;

/// Probability of each symptom being present, in canonical symptom order
type SymptomRates = [f64; SYMPTOM_COUNT];

const POSITIVE_RATES: SymptomRates = [
    1.0, // high fever
    0.9, // headache
    0.8, // joint pain
    0.8, // muscle pain
    0.6, // nausea/vomiting
    0.6, // rash
    0.5, // abdominal pain
    0.5, // epistaxis
    0.4, // gum bleeding
    0.7, // petechiae
    0.8, // lethargy
    0.7, // anorexia
    0.7, // retro-orbital pain
    0.3, // hepatomegaly
    0.8, // low platelet
];

const SUSPECT_RATES: SymptomRates = [
    1.0, 0.7, 0.5, 0.5, 0.4, 0.3, 0.2, 0.1, 0.1, 0.2, 0.6, 0.5, 0.4, 0.1, 0.3,
];

const NEGATIVE_RATES: SymptomRates = [
    0.7, 0.6, 0.3, 0.3, 0.5, 0.2, 0.3, 0.0, 0.0, 0.0, 0.6, 0.4, 0.2, 0.0, 0.0,
];

fn sample_symptoms(rng: &mut StdRng, rates: &SymptomRates) -> SymptomFlags {
    SymptomFlags::from_present(
        Symptom::ALL
            .iter()
            .zip(rates)
            .filter(|(_, rate)| rng.random_bool(**rate))
            .map(|(symptom, _)| *symptom),
    )
}

fn positive_severity(rng: &mut StdRng) -> Severity {
    let draw: f64 = rng.random();
    if draw < 0.5 {
        Severity::Ringan
    } else if draw < 0.85 {
        Severity::Sedang
    } else {
        Severity::Berat
    }
}

/// Build the simulated case base with a fixed seed
#[must_use]
pub fn simulated_case_base(seed: u64) -> Vec<Case> {
    let mut rng = StdRng::seed_from_u64(seed);
    let total = SIMULATED_POSITIVE + SIMULATED_SUSPECT + SIMULATED_NEGATIVE;
    let mut cases = Vec::with_capacity(total);

    for _ in 0..SIMULATED_POSITIVE {
        let id = format!("DBD_{:03}", cases.len() + 1);
        let symptoms = sample_symptoms(&mut rng, &POSITIVE_RATES);
        let severity = positive_severity(&mut rng);
        cases.push(Case::new(id, symptoms, Diagnosis::DbdPositif, severity));
    }

    for _ in 0..SIMULATED_SUSPECT {
        let id = format!("SUS_{:03}", cases.len() + 1);
        let symptoms = sample_symptoms(&mut rng, &SUSPECT_RATES);
        cases.push(Case::new(id, symptoms, Diagnosis::SuspekDbd, Severity::Observasi));
    }

    for _ in 0..SIMULATED_NEGATIVE {
        let id = format!("NEG_{:03}", cases.len() + 1);
        let symptoms = sample_symptoms(&mut rng, &NEGATIVE_RATES);
        cases.push(Case::new(id, symptoms, Diagnosis::BukanDbd, Severity::NonDbd));
    }

    info!("Simulated {} cases with seed {seed}", cases.len());
    cases
}
