#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sejour::{
    io,
    model::{Trip, TripId},
    policy::load_policy_from_file,
    report::{prepare_alert, TextAlert},
    storage::{JsonStorage, Storage},
    tracker::{history, RiskLevel, RiskThresholds, Tracker},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de suivi Schengen 90/180 (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de carnet (un par salarié)
    #[arg(long, global = true, default_value = "travelog.json")]
    travelog: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enregistrer un séjour
    AddTrip {
        /// Code pays ISO-3166 alpha-2 (ex: FR)
        #[arg(long)]
        country: String,
        /// Date d'entrée (AAAA-MM-JJ)
        #[arg(long)]
        entry: String,
        /// Date de sortie (AAAA-MM-JJ) ; omise = séjour en cours
        #[arg(long)]
        exit: Option<String>,
        /// Motif de dérogation pour accepter un avertissement
        #[arg(long)]
        reason: Option<String>,
    },

    /// Importer des séjours depuis un CSV
    ImportTrips {
        #[arg(long)]
        csv: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Retoucher les dates d'un séjour existant
    Amend {
        #[arg(long)]
        trip_id: String,
        #[arg(long)]
        entry: String,
        #[arg(long)]
        exit: Option<String>,
    },

    /// Supprimer un séjour
    Remove {
        #[arg(long)]
        trip_id: String,
    },

    /// État de conformité à une date de référence
    Status {
        /// Date de référence (AAAA-MM-JJ), défaut: aujourd'hui
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = 30)]
        green_floor: i64,
        #[arg(long, default_value_t = 10)]
        amber_floor: i64,
        /// Profil de seuils JSON (prioritaire sur les deux options ci-dessus)
        #[arg(long)]
        policy: Option<String>,
        /// Export CSV d'un historique jour par jour (optionnel)
        #[arg(long)]
        report: Option<String>,
        /// Début de l'historique exporté (défaut: date - 30 jours)
        #[arg(long)]
        from: Option<String>,
    },

    /// Prévision « et si » avec un séjour hypothétique
    Forecast {
        #[arg(long)]
        country: String,
        #[arg(long)]
        entry: String,
        #[arg(long)]
        exit: Option<String>,
        /// Date d'évaluation (AAAA-MM-JJ), défaut: sortie hypothétique + 1 jour
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = 30)]
        green_floor: i64,
        #[arg(long, default_value_t = 10)]
        amber_floor: i64,
    },

    /// Vérifier les chevauchements du carnet
    Check {
        /// Export CSV des chevauchements (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Générer une alerte texte pour un salarié
    Alert {
        #[arg(long)]
        traveler: String,
        #[arg(long, default_value_t = 30)]
        green_floor: i64,
        #[arg(long, default_value_t = 10)]
        amber_floor: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.travelog)?;
    let mut tracker = Tracker::new();
    *tracker.travelog_mut() = storage.load_or_default();

    let code = match cli.cmd {
        Commands::AddTrip {
            country,
            entry,
            exit,
            reason,
        } => {
            let entry: NaiveDate = entry.parse()?;
            let exit = parse_opt_date(exit)?;
            let id = match reason {
                Some(reason) => tracker.add_trip_with_override(&country, entry, exit, &reason)?,
                None => tracker.add_trip(&country, entry, exit)?,
            };
            storage.save(tracker.travelog())?;
            println!("Trip recorded: {}", id.as_str());
            0
        }
        Commands::ImportTrips { csv } => {
            let trips = io::import_trips_csv(csv)?;
            let added = tracker.import_trips(trips)?;
            storage.save(tracker.travelog())?;
            println!("Imported {added} trip(s)");
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_travelog_json(path, tracker.travelog())?;
            }
            if let Some(path) = out_csv {
                io::export_trips_csv(path, tracker.travelog())?;
            }
            // impression compacte
            for trip in &tracker.travelog().trips {
                let exit = trip
                    .exit
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "ouvert".to_string());
                println!(
                    "{} | {} | {} → {}",
                    trip.id.as_str(),
                    trip.country,
                    trip.entry,
                    exit
                );
            }
            0
        }
        Commands::Amend {
            trip_id,
            entry,
            exit,
        } => {
            let id = TripId::new(trip_id);
            let entry: NaiveDate = entry.parse()?;
            let exit = parse_opt_date(exit)?;
            tracker.amend_trip(&id, entry, exit)?;
            storage.save(tracker.travelog())?;
            0
        }
        Commands::Remove { trip_id } => {
            let id = TripId::new(trip_id);
            let removed = tracker.remove_trip(&id)?;
            storage.save(tracker.travelog())?;
            println!("Removed trip {} ({})", removed.id.as_str(), removed.country);
            0
        }
        Commands::Status {
            date,
            green_floor,
            amber_floor,
            policy,
            report,
            from,
        } => {
            let ref_date = parse_opt_date(date)?.unwrap_or_else(today);
            let thresholds = resolve_thresholds(policy, green_floor, amber_floor)?;
            let snap = tracker.snapshot(ref_date, thresholds);
            println!(
                "{} | used {} | remaining {} | {} | reentry {}",
                snap.ref_date, snap.days_used, snap.days_remaining, snap.risk, snap.reentry
            );
            if let Some(path) = report {
                let from = parse_opt_date(from)?
                    .unwrap_or(ref_date - chrono::Duration::days(30));
                if ref_date < from {
                    bail!("report start date is after the reference date");
                }
                let snaps = history(&tracker.travelog().trips, from, ref_date, thresholds);
                io::export_history_csv(path, &snaps)?;
            }
            exit_code_for(snap.risk)
        }
        Commands::Forecast {
            country,
            entry,
            exit,
            date,
            green_floor,
            amber_floor,
        } => {
            let entry: NaiveDate = entry.parse()?;
            let exit = parse_opt_date(exit)?;
            let ref_date = match parse_opt_date(date)? {
                Some(d) => d,
                None => exit
                    .and_then(|d| d.succ_opt())
                    .ok_or_else(|| anyhow::anyhow!("--date required for an open-ended forecast"))?,
            };
            let thresholds = RiskThresholds {
                green_floor,
                amber_floor,
            };
            let hypothetical = Trip::new(country, entry, exit).map_err(anyhow::Error::msg)?;
            let snap = tracker.forecast(&hypothetical, ref_date, thresholds);
            println!(
                "{} | used {} | remaining {} | {} | reentry {}",
                snap.ref_date, snap.days_used, snap.days_remaining, snap.risk, snap.reentry
            );
            exit_code_for(snap.risk)
        }
        Commands::Check { report } => {
            let overlaps = tracker.audit();
            if overlaps.is_empty() {
                println!("OK: no overlaps");
                0
            } else {
                eprintln!("Found {} overlap(s)", overlaps.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["trip_a", "trip_b"])?;
                    for (a, b) in &overlaps {
                        w.write_record([a.as_str(), b.as_str()])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Alert {
            traveler,
            green_floor,
            amber_floor,
            out,
        } => {
            let thresholds = RiskThresholds {
                green_floor,
                amber_floor,
            };
            let renderer = TextAlert;
            let alert = prepare_alert(
                tracker.travelog(),
                &traveler,
                today(),
                thresholds,
                &renderer,
            )?;
            std::fs::write(&out, alert.content)?;
            println!(
                "Alert generated for {} ({} day(s) remaining, {})",
                alert.traveler, alert.snapshot.days_remaining, alert.snapshot.risk
            );
            exit_code_for(alert.snapshot.risk)
        }
    };

    std::process::exit(code);
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_opt_date(raw: Option<String>) -> Result<Option<NaiveDate>> {
    raw.map(|s| s.parse::<NaiveDate>().map_err(anyhow::Error::from))
        .transpose()
}

fn resolve_thresholds(
    policy: Option<String>,
    green_floor: i64,
    amber_floor: i64,
) -> Result<RiskThresholds> {
    if let Some(path) = policy {
        let policy = load_policy_from_file(path)?;
        return Ok(policy.thresholds());
    }
    Ok(RiskThresholds {
        green_floor,
        amber_floor,
    })
}

// Code 2 = le salarié est (ou serait) dans le rouge
fn exit_code_for(risk: RiskLevel) -> i32 {
    match risk {
        RiskLevel::Red => 2,
        _ => 0,
    }
}
