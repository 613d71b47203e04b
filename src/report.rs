use crate::model::Travelog;
use crate::tracker::{snapshot, Reentry, RiskThresholds, Snapshot};
use anyhow::{bail, Result};
use chrono::NaiveDate;

/// Représente une alerte de conformité générée pour un salarié.
#[derive(Debug, Clone)]
pub struct Alert {
    pub traveler: String,
    pub snapshot: Snapshot,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait AlertRenderer {
    fn render(&self, traveler: &str, snapshot: &Snapshot) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAlert;

impl AlertRenderer for TextAlert {
    fn render(&self, traveler: &str, snapshot: &Snapshot) -> String {
        let reentry_line = match snapshot.reentry {
            Reentry::EligibleNow => "Une entrée dans l'espace Schengen est possible dès maintenant.".to_string(),
            Reentry::From(date) => format!("Prochaine entrée possible le {date}."),
            Reentry::Unresolved => {
                "Date de retour indéterminée : le carnet de voyages est à vérifier.".to_string()
            }
        };
        format!(
            "Bonjour {name},\n\nAu {date}, {used} jour(s) de présence Schengen sur les 180 derniers jours.\nJours restants : {remaining} (niveau {risk}).\n{reentry}\n\nMerci de vérifier tes prochains déplacements avant réservation.\n",
            name = traveler,
            date = snapshot.ref_date,
            used = snapshot.days_used,
            remaining = snapshot.days_remaining,
            risk = snapshot.risk,
            reentry = reentry_line
        )
    }
}

/// Prépare l'alerte de conformité d'un salarié à la date `today`.
pub fn prepare_alert(
    travelog: &Travelog,
    traveler: &str,
    today: NaiveDate,
    thresholds: RiskThresholds,
    renderer: &dyn AlertRenderer,
) -> Result<Alert> {
    if traveler.trim().is_empty() {
        bail!("traveler name cannot be empty");
    }

    let snap = snapshot(&travelog.trips, today, thresholds);
    let content = renderer.render(traveler, &snap);
    Ok(Alert {
        traveler: traveler.to_string(),
        snapshot: snap,
        content,
    })
}
