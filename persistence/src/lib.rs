//! JSON-file persistence for completed searches.

use chrono::{DateTime, Utc};
use matcher::ScoredJob;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: '{0}'")]
    Serde(#[from] serde_json::Error),
}

/// One completed, ranked search as written to disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub role: String,
    pub location: String,
    pub jobs: Vec<ScoredJob>,
}

impl Snapshot {
    pub fn new(role: impl Into<String>, location: impl Into<String>, jobs: Vec<ScoredJob>) -> Self {
        Self {
            saved_at: Utc::now(),
            role: role.into(),
            location: location.into(),
            jobs,
        }
    }
}

pub async fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json).await?;
    log::info!("saved {} jobs to {}", snapshot.jobs.len(), path.display());
    Ok(())
}

pub async fn load(path: &Path) -> Result<Snapshot> {
    let data = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&data)?)
}
