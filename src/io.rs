use crate::model::{Travelog, Trip};
use crate::tracker::{validate_trip, Snapshot};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de séjours depuis CSV: header `country,entry[,exit]` (dates ISO `AAAA-MM-JJ`)
///
/// Une cellule `exit` vide = séjour ouvert. Chaque ligne est validée contre
/// les lignes déjà acceptées ; un conflit dur interrompt l'import avec le
/// numéro de ligne, un avertissement (séjour ouvert, séjour long) passe.
pub fn import_trips_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Trip>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out: Vec<Trip> = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let line = row + 2; // header = ligne 1
        let country = rec.get(0).context("missing country")?.trim();
        if country.is_empty() {
            bail!("invalid trip row {line} (empty country)");
        }
        let entry = rec.get(1).context("missing entry date")?.trim();
        let entry: NaiveDate = entry
            .parse()
            .with_context(|| format!("invalid entry date at row {line}: {entry}"))?;
        let exit = match rec.get(2).map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<NaiveDate>()
                    .with_context(|| format!("invalid exit date at row {line}: {raw}"))?,
            ),
        };

        let report = validate_trip(&out, entry, exit, None);
        if let Some(err) = report.errors.first() {
            bail!("rejected trip row {line}: {err}");
        }
        let trip = Trip::new(country, entry, exit).map_err(anyhow::Error::msg)?;
        out.push(trip);
    }
    Ok(out)
}

/// Export JSON du carnet (jolie mise en forme)
pub fn export_travelog_json<P: AsRef<Path>>(path: P, travelog: &Travelog) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(travelog)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des séjours: header `id,country,entry,exit,override_note`
pub fn export_trips_csv<P: AsRef<Path>>(path: P, travelog: &Travelog) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "country", "entry", "exit", "override_note"])?;
    for trip in &travelog.trips {
        let entry = trip.entry.to_string();
        let exit = trip.exit.map(|d| d.to_string()).unwrap_or_default();
        w.write_record([
            trip.id.as_str(),
            trip.country.as_str(),
            entry.as_str(),
            exit.as_str(),
            trip.override_note.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV d'un historique de photographies:
/// header `date,days_used,days_remaining,risk,reentry`
pub fn export_history_csv<P: AsRef<Path>>(path: P, history: &[Snapshot]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "days_used", "days_remaining", "risk", "reentry"])?;
    let mut used_buf = itoa::Buffer::new();
    let mut remaining_buf = itoa::Buffer::new();
    for snap in history {
        let date = snap.ref_date.to_string();
        let reentry = snap.reentry.to_string();
        w.write_record([
            date.as_str(),
            used_buf.format(snap.days_used),
            remaining_buf.format(snap.days_remaining),
            snap.risk.as_str(),
            reentry.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
