use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Trip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripId(String);

impl TripId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Séjour déclaré : pays ISO-3166 alpha-2, dates civiles, bornes incluses.
///
/// `exit: None` = séjour en cours (sans date de sortie connue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub country: String,
    pub entry: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<NaiveDate>,
    /// Motif de dérogation consigné quand un avertissement a été accepté.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_note: Option<String>,
}

impl Trip {
    /// Crée un séjour en validant que `exit >= entry` quand la sortie est connue.
    pub fn new<C: Into<String>>(
        country: C,
        entry: NaiveDate,
        exit: Option<NaiveDate>,
    ) -> Result<Self, String> {
        if let Some(exit_date) = exit {
            if exit_date < entry {
                return Err("exit must be on or after entry".to_string());
            }
        }
        Ok(Self {
            id: TripId::random(),
            country: country.into(),
            entry,
            exit,
            override_note: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.exit.is_none()
    }

    /// Durée en jours, bornes incluses (None pour un séjour ouvert).
    pub fn duration_days(&self) -> Option<i64> {
        self.exit
            .map(|exit| exit.signed_duration_since(self.entry).num_days() + 1)
    }
}

/// Carnet de voyages d'un salarié (un fichier par personne)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Travelog {
    pub trips: Vec<Trip>,
}

impl Travelog {
    pub fn find_trip<'a>(&'a self, id: &TripId) -> Option<&'a Trip> {
        self.trips.iter().find(|t| &t.id == id)
    }
    pub fn find_trip_mut(&mut self, id: &TripId) -> Option<&mut Trip> {
        self.trips.iter_mut().find(|t| &t.id == id)
    }
}
