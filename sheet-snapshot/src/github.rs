//! Content store backed by the GitHub repository contents API.
//!
//! - read: `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`
//! - write: `PUT /repos/{owner}/{repo}/contents/{path}`
//!
//! Statuses are handed back to the publisher as they are; only transport
//! failures become errors.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::env;

use sheet_snapshot_core::contract::{ContentEntry, ContentStore, ContentsResponse, PutContents};
use sheet_snapshot_core::error::BoxError;
use sheet_snapshot_core::location::RemoteLocation;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Reads `GITHUB_TOKEN` and `GITHUB_API_URL`; both are optional.
    pub fn new_from_env() -> Self {
        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        let base_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());
        if token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set; remote publishing will be unauthenticated");
        }
        tracing::info!(base_url = %base_url, token_set = token.is_some(), "Initialized GitHubClient from environment");
        Self::new(base_url, token)
    }

    fn contents_url(&self, location: &RemoteLocation) -> Result<Url, BoxError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| format!("cannot use {} as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(["repos", location.owner.as_str(), location.repo.as_str(), "contents"])
            .extend(location.path.split('/'));
        Ok(url)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(USER_AGENT, concat!("sheet-snapshot/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

/// A directory read answers with an array of entries, a file with one object.
fn parse_entry(body: &Value) -> ContentEntry {
    match body {
        Value::Array(_) => ContentEntry {
            kind: "dir".to_string(),
            sha: None,
        },
        _ => ContentEntry {
            kind: body
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            sha: body.get("sha").and_then(Value::as_str).map(str::to_string),
        },
    }
}

#[async_trait]
impl ContentStore for GitHubClient {
    async fn get_contents(&self, location: &RemoteLocation) -> Result<ContentsResponse, BoxError> {
        let url = self.contents_url(location)?;
        tracing::debug!(repo = %location.full_name(), path = %location.path, branch = %location.branch, "Reading repository contents");
        let response = self
            .with_headers(self.http.get(url))
            .query(&[("ref", location.branch.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let entry = if status == 200 {
            let body: Value = response.json().await?;
            Some(parse_entry(&body))
        } else {
            None
        };
        Ok(ContentsResponse { status, entry })
    }

    async fn put_contents(
        &self,
        location: &RemoteLocation,
        body: PutContents,
    ) -> Result<u16, BoxError> {
        let url = self.contents_url(location)?;
        tracing::info!(
            repo = %location.full_name(),
            path = %location.path,
            branch = %body.branch,
            update = body.sha.is_some(),
            "Writing repository contents"
        );
        let response = self
            .with_headers(self.http.put(url))
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status, path = %location.path, body = %text, "GitHub contents write failed");
        }
        Ok(status)
    }
}
