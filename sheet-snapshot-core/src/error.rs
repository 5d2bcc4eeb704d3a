//! Error taxonomy shared by every stage of the snapshot pipeline.
//!
//! Each variant is terminal for the unit of work it belongs to (one entry or
//! one destination). Nothing in the pipeline retries.

use thiserror::Error;

/// Boxed error returned by the [`crate::contract`] traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A configuration entry lacks its spreadsheet id or its location.
    #[error("invalid entry (id: {id:?}, location: {location:?})")]
    InvalidEntry {
        id: Option<String>,
        location: Option<String>,
    },

    /// The spreadsheet source could not load metadata, rows or cells.
    #[error("spreadsheet {spreadsheet_id} unavailable: {reason}")]
    SourceUnavailable {
        spreadsheet_id: String,
        reason: String,
    },

    /// The destination string is neither a remote blob URL nor a known local file type.
    #[error("not a valid location {0}")]
    UnroutableLocation(String),

    /// The remote path exists but holds a directory (or anything that is not a plain file).
    #[error("{path} isn't a file to be updated. it's {kind}.")]
    NotAFile { path: String, kind: String },

    /// The remote store answered a read with a status that is neither found nor not-found.
    #[error("unexpected status {status} reading {path}")]
    UnexpectedStatus { status: u16, path: String },

    /// The request never produced a status (connection, TLS, decoding).
    #[error("request to {target} failed: {source}")]
    Transport {
        target: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A spawned destination task panicked or was cancelled.
    #[error("destination task failed: {0}")]
    Task(String),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
