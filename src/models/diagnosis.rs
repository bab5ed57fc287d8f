//! Diagnosis, verdict and severity labels
//!
//! Stored cases carry a `Diagnosis` and a `Severity` as ground truth. The
//! engine answers with a `Verdict`, which adds the explicit
//! `DATA_INSUFFICIENT` state, and may answer with the output-only severities
//! `INSUFFICIENT` and `UNKNOWN`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CbrError;

/// Ground-truth diagnosis of a stored case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagnosis {
    /// Confirmed dengue hemorrhagic fever
    DbdPositif,
    /// Suspected dengue, needs lab confirmation
    SuspekDbd,
    /// Not dengue
    BukanDbd,
}

impl Diagnosis {
    /// All diagnoses in tie-break priority order (highest first)
    pub const PRIORITY: [Self; 3] = [Self::DbdPositif, Self::SuspekDbd, Self::BukanDbd];

    /// Position in the priority order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label as it appears in data files
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DbdPositif => "DBD_POSITIF",
            Self::SuspekDbd => "SUSPEK_DBD",
            Self::BukanDbd => "BUKAN_DBD",
        }
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DbdPositif => "Dengue hemorrhagic fever (positive)",
            Self::SuspekDbd => "Suspected dengue hemorrhagic fever",
            Self::BukanDbd => "Not dengue hemorrhagic fever",
        }
    }

    /// Whether `severity` may be recorded together with this diagnosis
    #[must_use]
    pub const fn admits(self, severity: Severity) -> bool {
        matches!(
            (self, severity),
            (
                Self::DbdPositif,
                Severity::Ringan | Severity::Sedang | Severity::Berat
            ) | (Self::SuspekDbd, Severity::Observasi)
                | (Self::BukanDbd, Severity::NonDbd)
        )
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Diagnosis {
    type Err = CbrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DBD_POSITIF" => Ok(Self::DbdPositif),
            "SUSPEK_DBD" => Ok(Self::SuspekDbd),
            "BUKAN_DBD" => Ok(Self::BukanDbd),
            other => Err(CbrError::configuration(format!(
                "Unknown diagnosis label '{other}'"
            ))),
        }
    }
}

/// Final answer of one CBR cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Confirmed dengue hemorrhagic fever
    DbdPositif,
    /// Suspected dengue hemorrhagic fever
    SuspekDbd,
    /// Not dengue
    BukanDbd,
    /// Too little information to reason about
    DataInsufficient,
}

impl Verdict {
    /// Label as reported to consumers
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DbdPositif => "DBD_POSITIF",
            Self::SuspekDbd => "SUSPEK_DBD",
            Self::BukanDbd => "BUKAN_DBD",
            Self::DataInsufficient => "DATA_INSUFFICIENT",
        }
    }

    /// The diagnosis behind this verdict, if any
    #[must_use]
    pub const fn diagnosis(self) -> Option<Diagnosis> {
        match self {
            Self::DbdPositif => Some(Diagnosis::DbdPositif),
            Self::SuspekDbd => Some(Diagnosis::SuspekDbd),
            Self::BukanDbd => Some(Diagnosis::BukanDbd),
            Self::DataInsufficient => None,
        }
    }
}

impl From<Diagnosis> for Verdict {
    fn from(diagnosis: Diagnosis) -> Self {
        match diagnosis {
            Diagnosis::DbdPositif => Self::DbdPositif,
            Diagnosis::SuspekDbd => Self::SuspekDbd,
            Diagnosis::BukanDbd => Self::BukanDbd,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Severity labels
///
/// The first five are valid on stored cases. `Insufficient` and `Unknown`
/// are only produced by the voting aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Mild dengue
    Ringan,
    /// Moderate dengue
    Sedang,
    /// Severe dengue
    Berat,
    /// Suspected case under observation
    Observasi,
    /// Not applicable (not dengue)
    NonDbd,
    /// Too few symptoms were reported
    Insufficient,
    /// No similar cases were available
    Unknown,
}

/// Number of severity labels
pub const SEVERITY_COUNT: usize = 7;

impl Severity {
    /// Every severity in declaration order
    pub const ALL: [Self; SEVERITY_COUNT] = [
        Self::Ringan,
        Self::Sedang,
        Self::Berat,
        Self::Observasi,
        Self::NonDbd,
        Self::Insufficient,
        Self::Unknown,
    ];

    /// Position in declaration order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label as it appears in data files
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ringan => "RINGAN",
            Self::Sedang => "SEDANG",
            Self::Berat => "BERAT",
            Self::Observasi => "OBSERVASI",
            Self::NonDbd => "NON_DBD",
            Self::Insufficient => "INSUFFICIENT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ringan => "Mild",
            Self::Sedang => "Moderate",
            Self::Berat => "Severe",
            Self::Observasi => "Observation",
            Self::NonDbd => "Not applicable",
            Self::Insufficient => "Insufficient data",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this label may be stored on a historical case
    #[must_use]
    pub const fn is_case_label(self) -> bool {
        !matches!(self, Self::Insufficient | Self::Unknown)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Severity {
    type Err = CbrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|severity| severity.code() == wanted)
            .ok_or_else(|| CbrError::configuration(format!("Unknown severity label '{wanted}'")))
    }
}
