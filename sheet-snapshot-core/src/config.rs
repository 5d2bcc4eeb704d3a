use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SnapshotError;
use crate::model::RenderOptions;
use crate::publish::DEFAULT_COMMIT_MESSAGE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default)]
    pub spreadsheets: Vec<SpreadsheetEntry>,
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            commit_message: default_commit_message(),
            spreadsheets: Vec::new(),
        }
    }
}

impl SnapshotConfig {
    pub fn trace_loaded(&self) {
        info!(
            commit_message = %self.commit_message,
            spreadsheets_count = self.spreadsheets.len(),
            "Loaded SnapshotConfig"
        );
        debug!(?self, "SnapshotConfig loaded (full debug)");
    }
}

/// Accepted shapes of a config file: a bare list of entries, or the full
/// object with `commit_message` and `spreadsheets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfigFile {
    Entries(Vec<SpreadsheetEntry>),
    Full(SnapshotConfig),
}

impl From<ConfigFile> for SnapshotConfig {
    fn from(file: ConfigFile) -> Self {
        match file {
            ConfigFile::Entries(spreadsheets) => SnapshotConfig {
                spreadsheets,
                ..Default::default()
            },
            ConfigFile::Full(config) => config,
        }
    }
}

/// One spreadsheet to snapshot and the places its renderings go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpreadsheetEntry {
    /// Spreadsheet id or spreadsheet link.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub location: Option<LocationSpec>,
    #[serde(default)]
    pub options: Option<RenderOptions>,
}

/// A single destination or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationSpec {
    One(String),
    Many(Vec<String>),
}

impl LocationSpec {
    pub fn locations(&self) -> Vec<&str> {
        match self {
            LocationSpec::One(location) => vec![location.as_str()],
            LocationSpec::Many(locations) => locations.iter().map(String::as_str).collect(),
        }
    }
}

/// An entry that passed validation.
#[derive(Debug, Clone)]
pub struct ValidEntry<'a> {
    pub id: &'a str,
    pub locations: Vec<&'a str>,
    pub options: RenderOptions,
}

impl SpreadsheetEntry {
    /// Checks that the entry names a spreadsheet and at least a location field.
    pub fn validate(&self) -> Result<ValidEntry<'_>, SnapshotError> {
        match (&self.id, &self.location) {
            (Some(id), Some(location)) => Ok(ValidEntry {
                id,
                locations: location.locations(),
                options: self.options.unwrap_or_default(),
            }),
            _ => Err(SnapshotError::InvalidEntry {
                id: self.id.clone(),
                location: self.location.as_ref().map(|l| l.locations().join(", ")),
            }),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            id = self.id.as_deref().unwrap_or("<missing>"),
            locations = self.location.as_ref().map(|l| l.locations().len()).unwrap_or(0),
            "Loaded spreadsheet entry"
        );
    }
}
