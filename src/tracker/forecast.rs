use super::presence::presence_days;
use super::types::{RiskThresholds, Snapshot, MAX_STAY_DAYS};
use super::window;
use crate::model::Trip;
use chrono::NaiveDate;

/// Photographie de conformité d'un carnet à `ref_date`.
pub fn snapshot(trips: &[Trip], ref_date: NaiveDate, thresholds: RiskThresholds) -> Snapshot {
    let presence = presence_days(trips, ref_date);
    let days_used = window::days_used_in_window(&presence, ref_date);
    let days_remaining = MAX_STAY_DAYS - days_used;

    Snapshot {
        ref_date,
        days_used,
        days_remaining,
        risk: window::risk_level(days_remaining, thresholds),
        reentry: window::earliest_safe_entry(&presence, ref_date),
    }
}

/// Rejoue le calcul de fenêtre avec un séjour hypothétique en plus.
///
/// `ref_date` peut être passé ou futur : la présence est plafonnée par
/// `ref_date`, donc un séjour à venir compte dès que son entrée le précède.
/// Répond à « quel serait mon niveau de risque le jour J avec ce voyage ? ».
pub fn forecast(
    trips: &[Trip],
    hypothetical: &Trip,
    ref_date: NaiveDate,
    thresholds: RiskThresholds,
) -> Snapshot {
    let mut combined: Vec<Trip> = trips.to_vec();
    combined.push(hypothetical.clone());
    snapshot(&combined, ref_date, thresholds)
}

/// Une photographie par jour sur l'intervalle fermé `[from, to]`.
pub fn history(
    trips: &[Trip],
    from: NaiveDate,
    to: NaiveDate,
    thresholds: RiskThresholds,
) -> Vec<Snapshot> {
    let mut out = Vec::new();
    let mut current = from;
    while current <= to {
        out.push(snapshot(trips, current, thresholds));
        let Some(next) = current.succ_opt() else { break };
        current = next;
    }
    out
}
