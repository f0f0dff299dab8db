//! Request-scoped orchestration state.
//!
//! [`ResearchSession`] owns everything the client side remembers: the HTTP
//! client, the mirror of the backend's conversational session, the local
//! conversation log, and the last result. State changes go through explicit
//! reducer-style transitions (`submit` → `on_success` / `on_failure`,
//! `clear_memory`) so there is no ambient mutable state and each transition
//! is testable on its own.
//!
//! Only one query is in flight at a time; callers disable their submit
//! control while `submit` blocks. A failed request surfaces a recoverable
//! error by default; demonstration data substitutes only under the
//! explicit [`Fallback::Demo`] policy.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::client::BackendClient;
use crate::config::Config;
use crate::demo;
use crate::models::{AnalysisResult, SessionInfo};

/// What to do when the backend fails or is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Surface a recoverable error (default)
    Error,
    /// Substitute the deterministic demonstration result
    Demo,
}

/// One completed query/response pair in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: Uuid,
    pub query: String,
    pub excerpt: String,
    pub timestamp: DateTime<Utc>,
}

/// Characters of the summary kept in a conversation-log excerpt.
const EXCERPT_LEN: usize = 200;

pub struct ResearchSession {
    client: BackendClient,
    current: Option<SessionInfo>,
    history: Vec<Exchange>,
    last_result: Option<AnalysisResult>,
}

impl ResearchSession {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(BackendClient::new(&config.backend_url)?))
    }

    pub fn with_client(client: BackendClient) -> Self {
        Self { client, current: None, history: Vec::new(), last_result: None }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    pub fn session(&self) -> Option<&SessionInfo> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Validate and trim a raw query. None means there is nothing to submit
    /// and no network call may happen.
    pub fn prepare(raw_query: &str) -> Option<String> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }

    /// Submit a query and settle the session state with the outcome.
    pub fn submit(&mut self, raw_query: &str, fallback: Fallback) -> Result<&AnalysisResult> {
        let Some(query) = Self::prepare(raw_query) else {
            bail!("Query is empty");
        };

        match self.client.analyze(&query) {
            Ok(result) => Ok(self.on_success(result)),
            Err(error) => self.on_failure(&query, error, fallback),
        }
    }

    /// Apply a settled result: log the exchange when it continues an active
    /// conversation, then mirror the backend's session state.
    pub fn on_success(&mut self, result: AnalysisResult) -> &AnalysisResult {
        if self.current.is_some() {
            self.history.push(Exchange {
                id: Uuid::new_v4(),
                query: result.query.clone(),
                excerpt: excerpt(&result.market.summary),
                timestamp: result.timestamp,
            });
        }
        self.current = result.session.as_ref().filter(|s| s.active).cloned();
        self.last_result.insert(result)
    }

    fn on_failure(
        &mut self,
        query: &str,
        error: anyhow::Error,
        fallback: Fallback,
    ) -> Result<&AnalysisResult> {
        warn!("Research request failed: {:#}", error);
        match fallback {
            Fallback::Demo => {
                let result = demo::demo_result(query, Utc::now());
                Ok(self.on_success(result))
            }
            Fallback::Error => Err(error.context(
                "Research request failed; the backend may be down (use --demo for an offline demonstration)",
            )),
        }
    }

    /// Drop the conversational context. Local state clears unconditionally;
    /// the backend call is best-effort and its failure is only logged.
    /// Returns whether the backend confirmed the clear.
    pub fn clear_memory(&mut self) -> bool {
        self.current = None;
        self.history.clear();

        match self.client.clear_memory() {
            Ok(()) => true,
            Err(error) => {
                warn!("Backend memory clear failed, local state cleared anyway: {:#}", error);
                false
            }
        }
    }
}

fn excerpt(summary: &str) -> String {
    let mut excerpt: String = summary.chars().take(EXCERPT_LEN).collect();
    if summary.chars().count() > EXCERPT_LEN {
        excerpt.push_str("...");
    }
    excerpt
}
