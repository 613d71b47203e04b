use super::types::{Reentry, RiskLevel, RiskThresholds};
use super::types::{MAX_STAY_DAYS, REENTRY_SEARCH_CAP_DAYS, WINDOW_DAYS};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Jours de présence comptés dans la fenêtre `[ref_date - 180, ref_date - 1]`.
///
/// Bornes incluses ; `ref_date` lui-même n'est jamais compté : le jour de
/// l'évaluation n'est pas encore « dépensé ».
pub fn days_used_in_window(presence: &BTreeSet<NaiveDate>, ref_date: NaiveDate) -> i64 {
    let start = ref_date - Duration::days(WINDOW_DAYS);
    let end = ref_date - Duration::days(1);
    presence.range(start..=end).count() as i64
}

/// `90 - days_used_in_window` ; négatif = quota dépassé de N jours, pas une erreur.
pub fn days_remaining(presence: &BTreeSet<NaiveDate>, ref_date: NaiveDate) -> i64 {
    MAX_STAY_DAYS - days_used_in_window(presence, ref_date)
}

/// Classe `days_remaining` selon les seuils fournis par l'appelant.
pub fn risk_level(days_remaining: i64, thresholds: RiskThresholds) -> RiskLevel {
    if days_remaining >= thresholds.green_floor {
        RiskLevel::Green
    } else if days_remaining >= thresholds.amber_floor {
        RiskLevel::Amber
    } else {
        RiskLevel::Red
    }
}

/// Première date à laquelle une entrée redevient possible.
///
/// Si entrer aujourd'hui ne porte pas la fenêtre à 90 jours ou plus, renvoie
/// [`Reentry::EligibleNow`]. Sinon la recherche avance jour par jour jusqu'à
/// ce que le total de fenêtre retombe sous le plafond. La présence étant
/// finie, les jours anciens finissent par sortir de la fenêtre ; la borne de
/// `today + 366` jours couvre le cas d'un carnet incohérent et se traduit
/// par [`Reentry::Unresolved`].
pub fn earliest_safe_entry(presence: &BTreeSet<NaiveDate>, today: NaiveDate) -> Reentry {
    if days_used_in_window(presence, today) < MAX_STAY_DAYS {
        return Reentry::EligibleNow;
    }

    let mut day = today;
    for _ in 0..REENTRY_SEARCH_CAP_DAYS {
        let Some(next) = day.succ_opt() else {
            return Reentry::Unresolved;
        };
        day = next;
        if days_used_in_window(presence, day) < MAX_STAY_DAYS {
            return Reentry::From(day);
        }
    }

    Reentry::Unresolved
}
