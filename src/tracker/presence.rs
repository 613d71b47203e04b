use crate::country::is_schengen;
use crate::model::Trip;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Jours civils passés dans l'espace Schengen, bornés par `as_of`.
///
/// Chaque séjour Schengen contribue l'intervalle fermé
/// `[entry, min(exit, as_of)]` ; un séjour ouvert court jusqu'à `as_of`
/// inclus. Un séjour entièrement futur (entrée après `as_of`) ne contribue
/// rien : il relève de la prévision, pas du décompte. Les chevauchements se
/// fondent naturellement (sémantique d'ensemble, aucun double comptage).
pub fn presence_days(trips: &[Trip], as_of: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();

    for trip in trips {
        if !is_schengen(&trip.country) {
            continue;
        }
        if trip.entry > as_of {
            continue;
        }

        let end = trip.exit.map_or(as_of, |exit| exit.min(as_of));
        let mut day = trip.entry;
        while day <= end {
            days.insert(day);
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }

    days
}
