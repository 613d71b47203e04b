#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use sejour::{
    days_remaining, days_used_in_window, earliest_safe_entry, forecast, presence_days, risk_level,
    model::Trip,
    tracker::{snapshot, Reentry, RiskLevel, RiskThresholds},
};
use std::collections::BTreeSet;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn consecutive_days(from: NaiveDate, count: i64) -> BTreeSet<NaiveDate> {
    (0..count).map(|i| from + Duration::days(i)).collect()
}

#[test]
fn window_never_exceeds_its_length() {
    // 400 jours consécutifs : la fenêtre n'en voit jamais plus de 180
    let presence = consecutive_days(d(2024, 1, 1), 400);
    for offset in [0, 50, 200, 400, 600] {
        let ref_date = d(2024, 1, 1) + Duration::days(offset);
        let used = days_used_in_window(&presence, ref_date);
        assert!((0..=180).contains(&used), "used={used} at {ref_date}");
    }
}

#[test]
fn remaining_is_exactly_ninety_minus_used() {
    let presence = consecutive_days(d(2025, 1, 1), 120);
    for offset in [10, 60, 130, 250] {
        let ref_date = d(2025, 1, 1) + Duration::days(offset);
        assert_eq!(
            days_remaining(&presence, ref_date),
            90 - days_used_in_window(&presence, ref_date)
        );
    }
}

#[test]
fn remaining_goes_negative_when_over_limit() {
    let presence = consecutive_days(d(2025, 1, 1), 100);
    let ref_date = d(2025, 1, 1) + Duration::days(100);
    assert_eq!(days_used_in_window(&presence, ref_date), 100);
    assert_eq!(days_remaining(&presence, ref_date), -10);
}

#[test]
fn reference_day_is_excluded_from_the_window() {
    let ref_date = d(2025, 6, 15);
    let mut presence = BTreeSet::new();
    presence.insert(ref_date); // jour d'évaluation : pas encore dépensé
    assert_eq!(days_used_in_window(&presence, ref_date), 0);

    presence.insert(ref_date - Duration::days(1)); // veille : comptée
    assert_eq!(days_used_in_window(&presence, ref_date), 1);

    presence.insert(ref_date - Duration::days(180)); // borne basse : comptée
    assert_eq!(days_used_in_window(&presence, ref_date), 2);

    presence.insert(ref_date - Duration::days(181)); // sortie de fenêtre
    assert_eq!(days_used_in_window(&presence, ref_date), 2);
}

#[test]
fn risk_level_boundaries() {
    let thresholds = RiskThresholds::default();
    assert_eq!(risk_level(90, thresholds), RiskLevel::Green);
    assert_eq!(risk_level(30, thresholds), RiskLevel::Green);
    assert_eq!(risk_level(29, thresholds), RiskLevel::Amber);
    assert_eq!(risk_level(10, thresholds), RiskLevel::Amber);
    assert_eq!(risk_level(9, thresholds), RiskLevel::Red);
    assert_eq!(risk_level(0, thresholds), RiskLevel::Red);
    assert_eq!(risk_level(-15, thresholds), RiskLevel::Red);
}

#[test]
fn risk_level_honors_custom_thresholds() {
    let strict = RiskThresholds {
        green_floor: 45,
        amber_floor: 20,
    };
    assert_eq!(risk_level(44, strict), RiskLevel::Amber);
    assert_eq!(risk_level(19, strict), RiskLevel::Red);
    assert_eq!(risk_level(45, strict), RiskLevel::Green);
}

#[test]
fn already_eligible_needs_no_wait() {
    let presence = consecutive_days(d(2025, 1, 1), 20);
    assert_eq!(
        earliest_safe_entry(&presence, d(2025, 2, 1)),
        Reentry::EligibleNow
    );
}

#[test]
fn over_limit_waits_until_window_drains() {
    // 95 jours consécutifs se terminant hier : quota dépassé de 5
    let today = d(2025, 6, 1);
    let presence = consecutive_days(today - Duration::days(95), 95);
    assert_eq!(days_used_in_window(&presence, today), 95);

    let Reentry::From(reentry) = earliest_safe_entry(&presence, today) else {
        panic!("expected a wait date");
    };
    assert!(reentry > today);
    // à la date rendue, la fenêtre est bien retombée sous le plafond
    assert!(days_used_in_window(&presence, reentry) <= 89);
    // et pas un jour plus tôt
    assert!(days_used_in_window(&presence, reentry - Duration::days(1)) >= 90);
}

#[test]
fn unbounded_presence_reports_unresolved() {
    // présence saturant la fenêtre du jour et couvrant largement au-delà
    // de la borne de recherche
    let today = d(2025, 1, 1);
    let presence = consecutive_days(today - Duration::days(180), 780);
    assert_eq!(earliest_safe_entry(&presence, today), Reentry::Unresolved);
}

#[test]
fn future_trip_does_not_change_todays_window() {
    let today = d(2025, 5, 1);
    let mut trips = vec![Trip::new("FR", d(2025, 2, 1), Some(d(2025, 2, 20))).unwrap()];
    let before = snapshot(&trips, today, RiskThresholds::default());

    // ajout d'un séjour entièrement futur : la photo du jour est inchangée
    trips.push(Trip::new("DE", d(2025, 7, 1), Some(d(2025, 7, 15))).unwrap());
    let after = snapshot(&trips, today, RiskThresholds::default());
    assert_eq!(before, after);
}

#[test]
fn presence_days_is_idempotent() {
    let trips = vec![
        Trip::new("FR", d(2025, 1, 1), Some(d(2025, 1, 10))).unwrap(),
        Trip::new("NO", d(2025, 2, 1), None).unwrap(),
    ];
    let first = presence_days(&trips, d(2025, 2, 10));
    let second = presence_days(&trips, d(2025, 2, 10));
    assert_eq!(first, second);
}

#[test]
fn forecast_counts_a_future_trip_before_its_ref_date() {
    let trips = vec![Trip::new("FR", d(2025, 1, 1), Some(d(2025, 1, 10))).unwrap()];
    let hypothetical = Trip::new("ES", d(2025, 4, 1), Some(d(2025, 4, 14))).unwrap();

    let snap = forecast(&trips, &hypothetical, d(2025, 4, 20), RiskThresholds::default());
    assert_eq!(snap.days_used, 10 + 14);
    assert_eq!(snap.days_remaining, 66);
}

#[test]
fn forecast_ignores_non_schengen_hypothetical() {
    let trips = vec![Trip::new("FR", d(2025, 1, 1), Some(d(2025, 1, 10))).unwrap()];
    let hypothetical = Trip::new("IE", d(2025, 4, 1), Some(d(2025, 4, 14))).unwrap();

    let snap = forecast(&trips, &hypothetical, d(2025, 4, 20), RiskThresholds::default());
    assert_eq!(snap.days_used, 10);
}
