//! Create-or-update of one rendered document in a [`ContentStore`].
//!
//! The publisher reads the target path first so that an existing file is
//! replaced by sha rather than blindly overwritten. The read and the write
//! are two separate requests: a concurrent external writer in between makes
//! the write fail or win, last writer wins.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, error, info, warn};

use crate::contract::{ContentStore, PutContents};
use crate::error::SnapshotError;
use crate::location::RemoteLocation;

/// Default commit message for snapshot writes.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Spreadsheet snapshot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub location: RemoteLocation,
    pub message: String,
    pub content: String,
    /// Spreadsheet the content was rendered from, for diagnostics.
    pub document_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    Created,
    Updated,
    /// The write came back with a status that is neither created nor updated.
    Rejected { status: u16, document_id: String },
}

/// Publishes `request.content` at `request.location`.
pub async fn publish<C>(store: &C, request: &PublishRequest) -> Result<PublishResult, SnapshotError>
where
    C: ContentStore + ?Sized,
{
    let location = &request.location;
    let transport = |e| SnapshotError::Transport {
        target: location.to_string(),
        source: e,
    };

    let existing = store.get_contents(location).await.map_err(transport)?;
    let sha = match existing.status {
        200 => {
            let entry = existing.entry.ok_or_else(|| SnapshotError::UnexpectedStatus {
                status: existing.status,
                path: location.path.clone(),
            })?;
            if entry.kind != "file" {
                error!(path = %location.path, kind = %entry.kind, "[PUBLISH][ERROR] Target is not a file");
                return Err(SnapshotError::NotAFile {
                    path: location.path.clone(),
                    kind: entry.kind,
                });
            }
            debug!(path = %location.path, sha = ?entry.sha, "[PUBLISH] Updating existing file");
            entry.sha
        }
        404 => {
            debug!(path = %location.path, "[PUBLISH] Creating new file");
            None
        }
        status => {
            error!(path = %location.path, status, "[PUBLISH][ERROR] Unexpected status reading target");
            return Err(SnapshotError::UnexpectedStatus {
                status,
                path: location.path.clone(),
            });
        }
    };

    let body = PutContents {
        message: request.message.clone(),
        content: STANDARD.encode(request.content.as_bytes()),
        sha,
        branch: location.branch.clone(),
    };
    let status = store.put_contents(location, body).await.map_err(transport)?;

    match status {
        200 => {
            info!(document_id = %request.document_id, location = %location, "[PUBLISH] Updated");
            Ok(PublishResult::Updated)
        }
        201 => {
            info!(document_id = %request.document_id, location = %location, "[PUBLISH] Created");
            Ok(PublishResult::Created)
        }
        status => {
            warn!(document_id = %request.document_id, location = %location, status, "[PUBLISH] Unexpected status");
            Ok(PublishResult::Rejected {
                status,
                document_id: request.document_id.clone(),
            })
        }
    }
}
