//! Destination routing: turns configured location strings into typed targets.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SnapshotError;

/// Prefix of every location published through the remote store.
pub const REMOTE_PREFIX: &str = "https://github.com/";

fn blob_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/blob/([^/]+)/(.+)$")
            .expect("blob URL pattern is valid")
    })
}

/// A file inside a remote repository, on a given branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl RemoteLocation {
    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}/blob/{}/{}",
            REMOTE_PREFIX, self.owner, self.repo, self.branch, self.path
        )
    }
}

/// Parses `https://github.com/<owner>/<repo>/blob/<branch>/<path...>`.
pub fn parse_remote_location(location: &str) -> Result<RemoteLocation, SnapshotError> {
    let captures = blob_pattern()
        .captures(location)
        .ok_or_else(|| SnapshotError::UnroutableLocation(location.to_string()))?;
    Ok(RemoteLocation {
        owner: captures[1].to_string(),
        repo: captures[2].to_string(),
        branch: captures[3].to_string(),
        path: captures[4].to_string(),
    })
}

/// Serialization picked from the destination's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn from_location(location: &str) -> Option<Self> {
        if location.ends_with(".json") {
            Some(OutputFormat::Json)
        } else if location.ends_with(".md") {
            Some(OutputFormat::Markdown)
        } else if location.ends_with(".html") {
            Some(OutputFormat::Html)
        } else {
            None
        }
    }
}

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Local {
        path: PathBuf,
        format: OutputFormat,
    },
    Remote {
        location: RemoteLocation,
        format: OutputFormat,
    },
}

impl Destination {
    /// Routes one configured location string.
    ///
    /// Anything under [`REMOTE_PREFIX`] must be a blob URL; every other string
    /// is a local path. Either way the extension has to name a known format.
    pub fn parse(location: &str) -> Result<Self, SnapshotError> {
        let format = OutputFormat::from_location(location)
            .ok_or_else(|| SnapshotError::UnroutableLocation(location.to_string()))?;
        if location.starts_with(REMOTE_PREFIX) {
            let location = parse_remote_location(location)?;
            Ok(Destination::Remote { location, format })
        } else {
            Ok(Destination::Local {
                path: PathBuf::from(location),
                format,
            })
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            Destination::Local { format, .. } | Destination::Remote { format, .. } => *format,
        }
    }
}
