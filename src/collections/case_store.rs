//! The case store
//!
//! An immutable, insertion-ordered collection of validated historical cases.
//! It is built once per session and then only read.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::collections::OrderedCollection;
use crate::error::{CbrError, Result};
use crate::models::{Case, Diagnosis};

/// Read-only collection of historical cases
#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    cases: OrderedCollection<Case>,
    lab_aware: bool,
}

impl CaseStore {
    /// Build a store from normalized cases.
    ///
    /// Fails with a schema violation when a case is invalid, when two cases
    /// share an id, or when only some cases carry lab flags.
    pub fn build(cases: Vec<Case>) -> Result<Self> {
        let with_labs = cases.iter().filter(|case| case.lab_flags.is_some()).count();
        if with_labs != 0 && with_labs != cases.len() {
            let offender = cases
                .iter()
                .find(|case| case.lab_flags.is_none())
                .map_or_else(String::new, |case| case.case_id.clone());
            return Err(CbrError::schema_violation(
                offender,
                format!(
                    "lab flags must be present on all cases or none ({with_labs} of {} have them)",
                    cases.len()
                ),
            ));
        }

        let lab_aware = !cases.is_empty() && with_labs == cases.len();
        let mut collection = OrderedCollection::with_capacity(cases.len());

        for case in cases {
            case.validate()?;
            if let Err(duplicate) = collection.add(case) {
                return Err(CbrError::schema_violation(
                    duplicate.case_id,
                    "duplicate case_id",
                ));
            }
        }

        info!(
            "Built case store with {} cases ({})",
            collection.count(),
            if lab_aware { "lab-aware" } else { "symptoms only" }
        );

        Ok(Self {
            cases: collection,
            lab_aware,
        })
    }

    /// Number of stored cases
    #[must_use]
    pub fn size(&self) -> usize {
        self.cases.count()
    }

    /// Whether the store holds no cases
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// All cases in insertion order
    #[must_use]
    pub fn all_cases(&self) -> &[Case] {
        self.cases.as_slice()
    }

    /// Iterate over all cases in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.cases.as_slice().iter()
    }

    /// Look up a case by id
    pub fn find_by_id(&self, id: &str) -> Result<&Case> {
        debug!("Looking up case {id}");
        self.cases
            .get(&id.to_string())
            .ok_or_else(|| CbrError::NotFound(id.to_string()))
    }

    /// Whether every stored case carries lab flags
    #[must_use]
    pub const fn is_lab_aware(&self) -> bool {
        self.lab_aware
    }

    /// Number of cases per diagnosis, in priority order
    #[must_use]
    pub fn label_counts(&self) -> BTreeMap<Diagnosis, usize> {
        let mut counts: BTreeMap<Diagnosis, usize> =
            Diagnosis::PRIORITY.iter().map(|&d| (d, 0)).collect();
        for case in self.iter() {
            *counts.entry(case.diagnosis).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a CaseStore {
    type Item = &'a Case;
    type IntoIter = std::slice::Iter<'a, Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
