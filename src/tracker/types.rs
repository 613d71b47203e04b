use crate::model::TripId;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Longueur réglementaire de la fenêtre glissante, en jours.
pub const WINDOW_DAYS: i64 = 180;
/// Plafond de présence autorisé dans une fenêtre, en jours.
pub const MAX_STAY_DAYS: i64 = 90;
/// Borne de la recherche de date de retour (garde-fou, pas une règle métier).
pub const REENTRY_SEARCH_CAP_DAYS: i64 = 366;

/// Seuils de risque (en jours restants), réglables par l'appelant
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub green_floor: i64,
    pub amber_floor: i64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            green_floor: 30,
            amber_floor: 10,
        }
    }
}

/// Niveau de risque d'épuisement du quota de 90 jours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Amber,
    Red,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Amber => "amber",
            RiskLevel::Red => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue du calcul de date de retour.
///
/// `Unresolved` signale que la recherche a dépassé sa borne : incohérence de
/// données en amont, à distinguer d'une éligibilité immédiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reentry {
    EligibleNow,
    From(NaiveDate),
    Unresolved,
}

impl fmt::Display for Reentry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reentry::EligibleNow => f.write_str("now"),
            Reentry::From(date) => write!(f, "{date}"),
            Reentry::Unresolved => f.write_str("unresolved"),
        }
    }
}

/// Photographie de conformité à une date de référence.
///
/// Calculée à la demande, jamais persistée : fonction pure de ses entrées.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub ref_date: NaiveDate,
    pub days_used: i64,
    pub days_remaining: i64,
    pub risk: RiskLevel,
    pub reentry: Reentry,
}

/// Conflit bloquant : le séjour candidat ne doit pas être enregistré.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardError {
    InvertedRange { entry: NaiveDate, exit: NaiveDate },
    Overlap { other: TripId },
}

impl fmt::Display for HardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardError::InvertedRange { entry, exit } => {
                write!(f, "exit date {exit} is before entry date {entry}")
            }
            HardError::Overlap { other } => {
                write!(f, "trip dates overlap existing trip {}", other.as_str())
            }
        }
    }
}

/// Avertissement : acceptable avec une dérogation explicite et motivée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftWarning {
    OpenEnded,
    LongStay { days: i64 },
}

impl fmt::Display for SoftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftWarning::OpenEnded => f.write_str("trip has no exit date (ongoing stay)"),
            SoftWarning::LongStay { days } => {
                write!(f, "single stay spans {days} days (limit {MAX_STAY_DAYS})")
            }
        }
    }
}

/// Résultat de validation d'un candidat : des données, jamais des exceptions.
/// Les deux listes sont toujours renvoyées, même vides.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub errors: Vec<HardError>,
    pub warnings: Vec<SoftWarning>,
}

impl Validation {
    /// Aucun conflit bloquant (des avertissements peuvent rester).
    pub fn is_acceptable(&self) -> bool {
        self.errors.is_empty()
    }
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("invalid date range: exit must be on or after entry")]
    InvalidDateRange,
    #[error("trip overlaps existing trip: {0}")]
    Overlap(String),
    #[error("unknown trip: {0}")]
    UnknownTrip(String),
    #[error("override required: {0}")]
    NeedsOverride(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
