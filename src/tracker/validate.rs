use super::types::{HardError, SoftWarning, Validation, MAX_STAY_DAYS};
use super::util;
use crate::model::{Trip, TripId};
use chrono::NaiveDate;

/// Valide un séjour candidat contre le carnet existant.
///
/// Conflits durs : dates inversées, chevauchement avec un séjour non exclu.
/// Le simple contact (sortie d'un séjour == entrée de l'autre) est permis :
/// on peut quitter Schengen et rentrer ailleurs le même jour.
/// Avertissements : séjour ouvert, séjour isolé de plus de 90 jours.
/// `exclude` sert à revalider un séjour contre lui-même lors d'une retouche.
pub fn validate_trip(
    existing: &[Trip],
    entry: NaiveDate,
    exit: Option<NaiveDate>,
    exclude: Option<&TripId>,
) -> Validation {
    let mut report = Validation::default();

    if let Some(exit_date) = exit {
        if exit_date < entry {
            report.errors.push(HardError::InvertedRange {
                entry,
                exit: exit_date,
            });
            // bornes inversées : le contrôle de chevauchement n'a pas de sens
            return report;
        }
    }

    let candidate_end = exit.unwrap_or(NaiveDate::MAX);
    for trip in existing {
        if exclude == Some(&trip.id) {
            continue;
        }
        if util::overlaps(entry, candidate_end, trip.entry, util::effective_exit(trip)) {
            report.errors.push(HardError::Overlap {
                other: trip.id.clone(),
            });
        }
    }

    match exit {
        None => report.warnings.push(SoftWarning::OpenEnded),
        Some(exit_date) => {
            let span = exit_date.signed_duration_since(entry).num_days();
            if span > MAX_STAY_DAYS {
                report.warnings.push(SoftWarning::LongStay { days: span });
            }
        }
    }

    report
}

/// Recense les paires de séjours qui se chevauchent dans un carnet déjà
/// constitué (données importées avant validation, par exemple).
pub fn audit(trips: &[Trip]) -> Vec<(TripId, TripId)> {
    let mut out = Vec::new();

    for (idx, a) in trips.iter().enumerate() {
        for b in trips.iter().skip(idx + 1) {
            if util::overlaps(
                a.entry,
                util::effective_exit(a),
                b.entry,
                util::effective_exit(b),
            ) {
                out.push((a.id.clone(), b.id.clone()));
            }
        }
    }

    out
}
