//! Order source: the turn snapshot and territory metadata files.
//!
//! A snapshot is the JSON export of one turn:
//!
//! ```json
//! {
//!   "season": "Spring 1901",
//!   "orders": {"England": {"Lon": {"type": "MOVE", "to": "Nth"}}},
//!   "territories": {"Lon": "England"}
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::board::order::TerritoryId;
use crate::board::province::{coast_name, standard_territory};
use crate::board::state::{Ownership, TurnOrders};

/// Errors raised while reading source files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Io { path: path.to_path_buf(), source })
}

/// One turn of the game as exported by the order source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TurnSnapshot {
    /// Human label for the turn, e.g. `Spring 1901`.
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub orders: TurnOrders,
    /// Territory ownership before the turn resolves.
    #[serde(default)]
    pub territories: Ownership,
}

impl TurnSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json)
            .map_err(|source| SourceError::Json { origin: "turn snapshot".to_string(), source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        serde_json::from_str(&read_file(path)?)
            .map_err(|source| SourceError::Json { origin: path.display().to_string(), source })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TerritoryMetadata {
    name: String,
}

/// Display names for territory ids.
///
/// Falls back to the standard map for ids without an explicit entry, and to
/// the raw id when neither knows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerritoryCatalog {
    overrides: BTreeMap<String, TerritoryMetadata>,
}

impl TerritoryCatalog {
    /// A catalog backed only by the standard map.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Reads `{"Lon": {"name": "London"}, ...}`; extra fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let overrides = serde_json::from_str(json)
            .map_err(|source| SourceError::Json { origin: "territory catalog".to_string(), source })?;
        Ok(TerritoryCatalog { overrides })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let overrides = serde_json::from_str(&read_file(path)?)
            .map_err(|source| SourceError::Json { origin: path.display().to_string(), source })?;
        Ok(TerritoryCatalog { overrides })
    }

    /// Returns the name to print for `id`.
    pub fn display_name(&self, id: &TerritoryId) -> String {
        if let Some(meta) = self.overrides.get(id.as_str()) {
            return meta.name.clone();
        }
        let Some(standard) = standard_territory(id.as_str()) else {
            return id.to_string();
        };
        match id.as_str().split_once('/').and_then(|(_, coast)| coast_name(coast)) {
            Some(coast) => format!("{} ({})", standard.name, coast),
            None => standard.name.to_string(),
        }
    }
}
