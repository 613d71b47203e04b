mod forecast;
mod presence;
mod types;
mod util;
mod validate;
mod window;

pub use forecast::{forecast, history, snapshot};
pub use presence::presence_days;
pub use types::{
    HardError, Reentry, RiskLevel, RiskThresholds, Snapshot, SoftWarning, TrackError, Validation,
    MAX_STAY_DAYS, REENTRY_SEARCH_CAP_DAYS, WINDOW_DAYS,
};
pub use validate::{audit, validate_trip};
pub use window::{days_remaining, days_used_in_window, earliest_safe_entry, risk_level};

use crate::model::{Travelog, Trip, TripId};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Tracker : encapsule un Travelog en cours de tenue
#[derive(Debug, Default)]
pub struct Tracker {
    travelog: Travelog,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            travelog: Travelog::default(),
        }
    }

    pub fn travelog(&self) -> &Travelog {
        &self.travelog
    }
    pub fn travelog_mut(&mut self) -> &mut Travelog {
        &mut self.travelog
    }

    /// Enregistre un séjour après validation.
    ///
    /// Un conflit dur rejette ; un avertissement rejette aussi, faute de
    /// dérogation (voir [`Tracker::add_trip_with_override`]).
    pub fn add_trip(
        &mut self,
        country: &str,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
    ) -> Result<TripId, TrackError> {
        self.insert(country, entry, exit, None)
    }

    /// Variante avec dérogation : les avertissements passent, le motif est
    /// consigné sur le séjour.
    pub fn add_trip_with_override(
        &mut self,
        country: &str,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
        reason: &str,
    ) -> Result<TripId, TrackError> {
        self.insert(country, entry, exit, Some(reason.to_string()))
    }

    fn insert(
        &mut self,
        country: &str,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
        override_note: Option<String>,
    ) -> Result<TripId, TrackError> {
        let report = validate_trip(&self.travelog.trips, entry, exit, None);
        if let Some(err) = report.errors.first() {
            return Err(rejection(err));
        }
        if override_note.is_none() {
            if let Some(warning) = report.warnings.first() {
                return Err(TrackError::NeedsOverride(warning.to_string()));
            }
        }

        let mut trip =
            Trip::new(country, entry, exit).map_err(|_| TrackError::InvalidDateRange)?;
        trip.override_note = override_note;
        let id = trip.id.clone();
        self.travelog.trips.push(trip);
        Ok(id)
    }

    /// Retouche les dates d'un séjour ; le séjour s'exclut lui-même du
    /// contrôle de chevauchement. Seuls les conflits durs bloquent : les
    /// avertissements ont été tranchés à l'enregistrement initial.
    pub fn amend_trip(
        &mut self,
        id: &TripId,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
    ) -> Result<(), TrackError> {
        if self.travelog.find_trip(id).is_none() {
            return Err(TrackError::UnknownTrip(id.as_str().to_string()));
        }

        let report = validate_trip(&self.travelog.trips, entry, exit, Some(id));
        if let Some(err) = report.errors.first() {
            return Err(rejection(err));
        }

        let trip = self
            .travelog
            .find_trip_mut(id)
            .ok_or_else(|| TrackError::UnknownTrip(id.as_str().to_string()))?;
        trip.entry = entry;
        trip.exit = exit;
        Ok(())
    }

    pub fn remove_trip(&mut self, id: &TripId) -> Result<Trip, TrackError> {
        let Some(pos) = util::find_trip_index(&self.travelog.trips, id) else {
            return Err(TrackError::UnknownTrip(id.as_str().to_string()));
        };
        Ok(self.travelog.trips.remove(pos))
    }

    /// Import en masse : un conflit dur rejette tout le lot, les
    /// avertissements passent (un séjour ouvert est normal en cours de
    /// déplacement). Renvoie le nombre de séjours ajoutés.
    pub fn import_trips(&mut self, trips: Vec<Trip>) -> Result<usize, TrackError> {
        let mut added = 0usize;
        for trip in trips {
            let report = validate_trip(&self.travelog.trips, trip.entry, trip.exit, None);
            if let Some(err) = report.errors.first() {
                return Err(rejection(err));
            }
            self.travelog.trips.push(trip);
            added += 1;
        }
        Ok(added)
    }

    pub fn validate(
        &self,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
        exclude: Option<&TripId>,
    ) -> Validation {
        validate_trip(&self.travelog.trips, entry, exit, exclude)
    }

    pub fn presence(&self, as_of: NaiveDate) -> BTreeSet<NaiveDate> {
        presence_days(&self.travelog.trips, as_of)
    }

    pub fn snapshot(&self, ref_date: NaiveDate, thresholds: RiskThresholds) -> Snapshot {
        snapshot(&self.travelog.trips, ref_date, thresholds)
    }

    pub fn forecast(
        &self,
        hypothetical: &Trip,
        ref_date: NaiveDate,
        thresholds: RiskThresholds,
    ) -> Snapshot {
        forecast(&self.travelog.trips, hypothetical, ref_date, thresholds)
    }

    pub fn audit(&self) -> Vec<(TripId, TripId)> {
        audit(&self.travelog.trips)
    }
}

fn rejection(err: &HardError) -> TrackError {
    match err {
        HardError::InvertedRange { .. } => TrackError::InvalidDateRange,
        HardError::Overlap { other } => TrackError::Overlap(other.as_str().to_string()),
    }
}
