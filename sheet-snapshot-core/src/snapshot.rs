//! Run driver: assemble → render → deliver, for every configured spreadsheet.
//!
//! Entries are processed one after the other. Each entry's document is
//! assembled completely before anything is rendered; then every destination
//! of the entry gets its own spawned task that writes a local file or
//! publishes to the [`ContentStore`]. The driver does not wait for those tasks
//! before moving on to the next entry, so a slow or failing destination never
//! holds up the rest of the run. All tasks are joined once the last entry has
//! been dispatched, and every outcome ends up in the [`SnapshotReport`].
//!
//! # Error isolation
//! - Invalid entry or unavailable spreadsheet: the entry is skipped.
//! - Unroutable location, failed render, failed write or publish: only that
//!   destination fails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::assemble::assemble;
use crate::config::SnapshotConfig;
use crate::contract::{ContentStore, SpreadsheetSource};
use crate::error::SnapshotError;
use crate::location::Destination;
use crate::publish::{publish, PublishRequest, PublishResult};
use crate::render::render;

#[derive(Debug)]
pub struct SnapshotReport {
    pub entries: Vec<EntryReport>,
    pub destinations: Vec<DestinationReport>,
}

impl SnapshotReport {
    pub fn failed_destinations(&self) -> usize {
        self.destinations.iter().filter(|d| d.outcome.is_err()).count()
    }
}

#[derive(Debug)]
pub struct EntryReport {
    pub id: Option<String>,
    pub outcome: Result<usize, SnapshotError>,
}

#[derive(Debug)]
pub struct DestinationReport {
    pub document_id: String,
    pub location: String,
    pub outcome: Result<DestinationOutcome, SnapshotError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationOutcome {
    Written(PathBuf),
    Published(PublishResult),
}

struct PendingDestination {
    document_id: String,
    location: String,
    handle: JoinHandle<Result<DestinationOutcome, SnapshotError>>,
}

/// Snapshots every configured spreadsheet.
///
/// Must be called from within a tokio runtime.
pub async fn snapshot_all<S, C>(config: &SnapshotConfig, source: &S, store: Arc<C>) -> SnapshotReport
where
    S: SpreadsheetSource + ?Sized,
    C: ContentStore + 'static,
{
    info!(entries = config.spreadsheets.len(), "[SNAPSHOT] Starting snapshot run");

    let mut entries = Vec::new();
    let mut destinations = Vec::new();
    let mut pending = Vec::new();

    for entry in &config.spreadsheets {
        let valid = match entry.validate() {
            Ok(valid) => valid,
            Err(e) => {
                warn!(error = %e, "[SNAPSHOT] Skipping invalid entry");
                entries.push(EntryReport {
                    id: entry.id.clone(),
                    outcome: Err(e),
                });
                continue;
            }
        };

        let document = match assemble(source, valid.id).await {
            Ok(document) => document,
            Err(e) => {
                error!(id = valid.id, error = %e, "[SNAPSHOT][ERROR] Skipping unavailable spreadsheet");
                entries.push(EntryReport {
                    id: entry.id.clone(),
                    outcome: Err(e),
                });
                continue;
            }
        };
        entries.push(EntryReport {
            id: entry.id.clone(),
            outcome: Ok(document.sheets.len()),
        });

        for location in valid.locations {
            let rendered = Destination::parse(location).and_then(|destination| {
                let content = render(destination.format(), &document, &valid.options)?;
                Ok((destination, content))
            });
            let (destination, content) = match rendered {
                Ok(rendered) => rendered,
                Err(e) => {
                    error!(document_id = %document.spreadsheet_id, location, error = %e, "[SNAPSHOT][ERROR] Skipping destination");
                    destinations.push(DestinationReport {
                        document_id: document.spreadsheet_id.clone(),
                        location: location.to_string(),
                        outcome: Err(e),
                    });
                    continue;
                }
            };

            let store = Arc::clone(&store);
            let message = config.commit_message.clone();
            let document_id = document.spreadsheet_id.clone();
            let handle = tokio::spawn(async move {
                deliver(store.as_ref(), destination, content, message, document_id).await
            });
            pending.push(PendingDestination {
                document_id: document.spreadsheet_id.clone(),
                location: location.to_string(),
                handle,
            });
        }
    }

    for task in pending {
        let outcome = match task.handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(SnapshotError::Task(e.to_string())),
        };
        match &outcome {
            Ok(DestinationOutcome::Written(path)) => {
                info!(document_id = %task.document_id, path = %path.display(), "[SNAPSHOT] Wrote local file")
            }
            Ok(DestinationOutcome::Published(PublishResult::Created)) => {
                info!("Created {} into {}", task.document_id, task.location)
            }
            Ok(DestinationOutcome::Published(PublishResult::Updated)) => {
                info!("Updated {} into {}", task.document_id, task.location)
            }
            Ok(DestinationOutcome::Published(PublishResult::Rejected { status, .. })) => {
                error!("Unexpected status {} {}", status, task.document_id)
            }
            Err(e) => {
                error!(document_id = %task.document_id, location = %task.location, error = %e, "[SNAPSHOT][ERROR] Destination failed")
            }
        }
        destinations.push(DestinationReport {
            document_id: task.document_id,
            location: task.location,
            outcome,
        });
    }

    info!(
        entries = entries.len(),
        destinations = destinations.len(),
        "[SNAPSHOT] Snapshot run finished"
    );
    SnapshotReport {
        entries,
        destinations,
    }
}

async fn deliver<C>(
    store: &C,
    destination: Destination,
    content: String,
    message: String,
    document_id: String,
) -> Result<DestinationOutcome, SnapshotError>
where
    C: ContentStore + ?Sized,
{
    match destination {
        Destination::Local { path, .. } => {
            write_local(&path, &content).await?;
            Ok(DestinationOutcome::Written(path))
        }
        Destination::Remote { location, .. } => {
            let request = PublishRequest {
                location,
                message,
                content,
                document_id,
            };
            publish(store, &request)
                .await
                .map(DestinationOutcome::Published)
        }
    }
}

async fn write_local(path: &Path, content: &str) -> Result<(), SnapshotError> {
    let io_error = |source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, content).await.map_err(io_error)
}
