//! Clinical symptom and lab-flag vocabularies
//!
//! The canonical symptom set and its order are fixed system-wide. Both
//! vocabularies share the `FlagVector` representation so that query and
//! stored records are compared position by position.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use log::debug;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CbrError, Result};

/// Number of canonical symptoms
pub const SYMPTOM_COUNT: usize = 15;

/// Number of lab-derived flags
pub const LAB_FLAG_COUNT: usize = 3;

/// A closed vocabulary of binary features with a fixed order
pub trait FlagKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every member in canonical order
    const ALL: &'static [Self];

    /// Position of this member in the canonical order
    fn index(self) -> usize;

    /// Key used in data files and query maps
    fn key(self) -> &'static str;

    /// Look up a member by its data key
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.key() == key)
    }
}

/// Clinical symptoms reported on the intake checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symptom {
    /// Sudden high fever (>38°C)
    #[serde(rename = "demam_tinggi")]
    HighFever,
    /// Severe headache
    #[serde(rename = "sakit_kepala")]
    Headache,
    /// Joint pain ("break-bone fever")
    #[serde(rename = "nyeri_sendi")]
    JointPain,
    /// Muscle pain (myalgia)
    #[serde(rename = "nyeri_otot")]
    MusclePain,
    /// Nausea or vomiting
    #[serde(rename = "mual_muntah")]
    NauseaVomiting,
    /// Skin rash
    #[serde(rename = "ruam_kulit")]
    Rash,
    /// Abdominal pain
    #[serde(rename = "nyeri_perut")]
    AbdominalPain,
    /// Nosebleed
    #[serde(rename = "mimisan")]
    Epistaxis,
    /// Bleeding gums
    #[serde(rename = "gusi_berdarah")]
    GumBleeding,
    /// Red spots on the skin
    #[serde(rename = "bintik_merah")]
    Petechiae,
    /// Weakness and fatigue
    #[serde(rename = "lemah_lesu")]
    Lethargy,
    /// Loss of appetite
    #[serde(rename = "kehilangan_nafsu_makan")]
    Anorexia,
    /// Pain behind the eyes
    #[serde(rename = "nyeri_belakang_mata")]
    RetroOrbitalPain,
    /// Enlarged liver
    #[serde(rename = "pembesaran_hati")]
    Hepatomegaly,
    /// Low platelet count
    #[serde(rename = "trombosit_rendah")]
    LowPlatelet,
}

impl Symptom {
    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HighFever => "High fever",
            Self::Headache => "Headache",
            Self::JointPain => "Joint pain",
            Self::MusclePain => "Muscle pain",
            Self::NauseaVomiting => "Nausea/vomiting",
            Self::Rash => "Skin rash",
            Self::AbdominalPain => "Abdominal pain",
            Self::Epistaxis => "Nosebleed",
            Self::GumBleeding => "Gum bleeding",
            Self::Petechiae => "Petechiae",
            Self::Lethargy => "Lethargy",
            Self::Anorexia => "Loss of appetite",
            Self::RetroOrbitalPain => "Retro-orbital pain",
            Self::Hepatomegaly => "Hepatomegaly",
            Self::LowPlatelet => "Low platelet count",
        }
    }
}

impl FlagKey for Symptom {
    const ALL: &'static [Self] = &[
        Self::HighFever,
        Self::Headache,
        Self::JointPain,
        Self::MusclePain,
        Self::NauseaVomiting,
        Self::Rash,
        Self::AbdominalPain,
        Self::Epistaxis,
        Self::GumBleeding,
        Self::Petechiae,
        Self::Lethargy,
        Self::Anorexia,
        Self::RetroOrbitalPain,
        Self::Hepatomegaly,
        Self::LowPlatelet,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn key(self) -> &'static str {
        match self {
            Self::HighFever => "demam_tinggi",
            Self::Headache => "sakit_kepala",
            Self::JointPain => "nyeri_sendi",
            Self::MusclePain => "nyeri_otot",
            Self::NauseaVomiting => "mual_muntah",
            Self::Rash => "ruam_kulit",
            Self::AbdominalPain => "nyeri_perut",
            Self::Epistaxis => "mimisan",
            Self::GumBleeding => "gusi_berdarah",
            Self::Petechiae => "bintik_merah",
            Self::Lethargy => "lemah_lesu",
            Self::Anorexia => "kehilangan_nafsu_makan",
            Self::RetroOrbitalPain => "nyeri_belakang_mata",
            Self::Hepatomegaly => "pembesaran_hati",
            Self::LowPlatelet => "trombosit_rendah",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Binary flags derived from hematology values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabFlag {
    /// Hemoconcentration (hematocrit above the sex-specific range)
    #[serde(rename = "hematokrit_tinggi")]
    HighHematocrit,
    /// Leukopenia (WBC below 4,000/μL)
    #[serde(rename = "leukosit_rendah")]
    LowLeukocyte,
    /// Hemoglobin below 12 g/dl
    #[serde(rename = "hemoglobin_rendah")]
    LowHemoglobin,
}

impl LabFlag {
    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HighHematocrit => "High hematocrit",
            Self::LowLeukocyte => "Low leukocyte count",
            Self::LowHemoglobin => "Low hemoglobin",
        }
    }
}

impl FlagKey for LabFlag {
    const ALL: &'static [Self] = &[Self::HighHematocrit, Self::LowLeukocyte, Self::LowHemoglobin];

    fn index(self) -> usize {
        self as usize
    }

    fn key(self) -> &'static str {
        match self {
            Self::HighHematocrit => "hematokrit_tinggi",
            Self::LowLeukocyte => "leukosit_rendah",
            Self::LowHemoglobin => "hemoglobin_rendah",
        }
    }
}

impl fmt::Display for LabFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Fixed-order vector of binary flags over a closed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagVector<K: FlagKey, const N: usize> {
    flags: [bool; N],
    _key: PhantomData<K>,
}

/// The 15 clinical symptom flags of one record
pub type SymptomFlags = FlagVector<Symptom, SYMPTOM_COUNT>;

/// The 3 lab-derived flags of one record
pub type LabFlags = FlagVector<LabFlag, LAB_FLAG_COUNT>;

impl<K: FlagKey, const N: usize> Default for FlagVector<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FlagKey, const N: usize> FlagVector<K, N> {
    /// All flags cleared
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: [false; N],
            _key: PhantomData,
        }
    }

    /// All flags set
    #[must_use]
    pub const fn all_present() -> Self {
        Self {
            flags: [true; N],
            _key: PhantomData,
        }
    }

    /// Flags set for exactly the given members
    #[must_use]
    pub fn from_present(present: impl IntoIterator<Item = K>) -> Self {
        let mut flags = Self::new();
        for key in present {
            flags.set(key, true);
        }
        flags
    }

    /// Build from a lenient name→value map, as submitted with a query.
    ///
    /// Missing keys default to 0, non-zero values count as 1 and unknown
    /// keys are ignored.
    #[must_use]
    pub fn from_flag_map(values: &HashMap<String, i64>) -> Self {
        for name in values.keys() {
            if K::from_key(name).is_none() {
                debug!("Ignoring unknown flag key '{name}'");
            }
        }

        let mut flags = Self::new();
        for &key in K::ALL {
            if let Some(&value) = values.get(key.key()) {
                flags.set(key, value != 0);
            }
        }
        flags
    }

    /// Build from a strict name→value map for a stored case.
    ///
    /// Every canonical key must be present and hold 0 or 1.
    pub fn from_record_map(case_id: &str, values: &HashMap<String, i64>) -> Result<Self> {
        let mut flags = Self::new();
        for &key in K::ALL {
            let value = values.get(key.key()).ok_or_else(|| {
                CbrError::schema_violation(case_id, format!("missing flag '{}'", key.key()))
            })?;
            flags.set(key, parse_binary(case_id, key.key(), *value)?);
        }
        Ok(flags)
    }

    /// Whether the flag for `key` is set
    #[must_use]
    pub fn get(&self, key: K) -> bool {
        self.flags[key.index()]
    }

    /// The flag for `key` as 0/1
    #[must_use]
    pub fn value(&self, key: K) -> u8 {
        u8::from(self.get(key))
    }

    /// Set or clear the flag for `key`
    pub fn set(&mut self, key: K, present: bool) {
        self.flags[key.index()] = present;
    }

    /// Builder-style variant of [`Self::set`]
    #[must_use]
    pub fn with(mut self, key: K, present: bool) -> Self {
        self.set(key, present);
        self
    }

    /// Number of flags set
    #[must_use]
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// All members with their flag, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (K, bool)> + '_ {
        K::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// Members whose flag is set, in canonical order
    pub fn present(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().filter_map(|(key, present)| present.then_some(key))
    }
}

impl<K: FlagKey, const N: usize> Serialize for FlagVector<K, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(N))?;
        for (key, _) in self.iter() {
            map.serialize_entry(key.key(), &self.value(key))?;
        }
        map.end()
    }
}

/// Validate a stored 0/1 value
pub(crate) fn parse_binary(case_id: &str, key: &str, value: i64) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CbrError::schema_violation(
            case_id,
            format!("flag '{key}' must be 0 or 1, got {other}"),
        )),
    }
}
