use crate::tracker::{RiskThresholds, MAX_STAY_DAYS};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Profil de seuils de risque, réglable par les administrateurs RH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub green_floor: i64,
    pub amber_floor: i64,
}

impl Policy {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("policy id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("policy name cannot be empty");
        }
        if self.amber_floor < 0 {
            bail!("amber_floor must be >= 0");
        }
        if self.green_floor <= self.amber_floor {
            bail!("green_floor must be greater than amber_floor");
        }
        if self.green_floor > MAX_STAY_DAYS {
            bail!("green_floor cannot exceed {MAX_STAY_DAYS}");
        }
        Ok(())
    }

    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            green_floor: self.green_floor,
            amber_floor: self.amber_floor,
        }
    }
}

/// Profil par défaut : seuils réglementaires usuels 30/10.
pub fn default_policy() -> Policy {
    Policy {
        id: "default".to_string(),
        name: "Défaut".to_string(),
        description: Some("Seuils standards jours-restants".to_string()),
        green_floor: 30,
        amber_floor: 10,
    }
}

#[derive(Debug, Clone)]
pub struct PolicyInfo {
    pub policy: Policy,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Gestion simple des profils persistés sur disque.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    base_dir: PathBuf,
}

impl PolicyStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating policy directory {}", self.base_dir.display()))
    }

    pub fn save(&self, policy: &Policy) -> Result<PathBuf> {
        policy.validate()?;
        self.ensure_dir()?;
        let path = self.base_dir.join(format!("{}.json", policy.id));
        let json = serde_json::to_string_pretty(policy)?;
        fs::write(&path, json).with_context(|| format!("writing policy {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<Policy> {
        let path = self.base_dir.join(format!("{}.json", id));
        let data = fs::read(&path).with_context(|| format!("reading policy {}", path.display()))?;
        let policy: Policy = serde_json::from_slice(&data)
            .with_context(|| format!("parsing policy {}", path.display()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn list(&self) -> Result<Vec<PolicyInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            let policy: Policy = match serde_json::from_slice(&data) {
                Ok(p) => p,
                Err(err) => {
                    eprintln!("Warning: could not parse policy {}: {err}", path.display());
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            infos.push(PolicyInfo {
                policy,
                path,
                modified,
            });
        }
        infos.sort_by(|a, b| a.policy.id.cmp(&b.policy.id));
        Ok(infos)
    }
}

pub fn load_policy_from_file<P: AsRef<Path>>(path: P) -> Result<Policy> {
    let data = fs::read(&path)?;
    let policy: Policy = serde_json::from_slice(&data)?;
    policy.validate()?;
    Ok(policy)
}
