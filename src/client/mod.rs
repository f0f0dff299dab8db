//! HTTP client for the research backend.
//!
//! The backend is an opaque collaborator: `POST /analyze` (or `/research`
//! on older revisions) runs a query, `GET /status` reports connectivity,
//! `POST /clear-memory` drops conversational context. Responses may arrive
//! in either wire shape; the client normalizes them before anything else
//! sees them.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{AnalysisResult, BackendResponse, StatusReport};

/// Request timeout; the client imposes no other deadline on the backend.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    query: &'a str,
}

/// Blocking client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run a research query and return the normalized result.
    ///
    /// Older backend revisions expose the same operation as `/research`;
    /// a 404 on `/analyze` triggers one retry there.
    pub fn analyze(&self, query: &str) -> Result<AnalysisResult> {
        let response = self.post_analyze("analyze", query)?;
        let response = if response.status() == StatusCode::NOT_FOUND {
            debug!("/analyze not found, retrying against /research");
            self.post_analyze("research", query)?
        } else {
            response
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Backend error ({}): {}", status, body);
        }

        let wire: BackendResponse =
            response.json().context("Failed to parse backend response")?;
        let result = wire.normalize(query, Utc::now());
        debug!(agent = result.agent.label(), "Analysis response received");
        Ok(result)
    }

    fn post_analyze(&self, path: &str, query: &str) -> Result<reqwest::blocking::Response> {
        self.http
            .post(self.endpoint(path))
            .json(&AnalyzeRequest { query })
            .send()
            .with_context(|| format!("Failed to reach backend at {}", self.base_url))
    }

    /// Probe `GET /status`. An unreachable backend is reported as
    /// all-offline indicators, not an error.
    pub fn status(&self) -> Option<StatusReport> {
        let response = self.http.get(self.endpoint("status")).send();
        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<StatusReport>() {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Malformed status response: {}", e);
                    None
                }
            },
            Ok(resp) => {
                debug!(status = %resp.status(), "Status probe rejected");
                None
            }
            Err(e) => {
                debug!("Status probe failed: {}", e);
                None
            }
        }
    }

    /// Ask the backend to drop its conversational context.
    pub fn clear_memory(&self) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("clear-memory"))
            .send()
            .with_context(|| format!("Failed to reach backend at {}", self.base_url))?;

        if !response.status().is_success() {
            anyhow::bail!("Backend refused to clear memory ({})", response.status());
        }
        Ok(())
    }
}
