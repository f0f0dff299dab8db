//! Wire shapes accepted from the research backend.
//!
//! Two backend revisions are in the field: a structured shape
//! (`marketAnalysis` + optional `purchaseLikelihood` + `sources`) and a
//! terminal-report shape (`result` + `agent` + `timestamp` + optional
//! `session`). Both are accepted through one untagged union and normalized
//! into [`AnalysisResult`] by an explicit adapter, so everything downstream
//! of the client is shape-agnostic.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::analysis::{
    AgentKind, AnalysisResult, MarketAnalysis, PurchaseLikelihood, SessionInfo, Source,
};

/// Union of the response shapes a backend may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BackendResponse {
    Structured(StructuredResponse),
    Terminal(TerminalResponse),
}

/// Structured revision: `{ query, marketAnalysis, purchaseLikelihood?, sources? }`
#[derive(Debug, Deserialize)]
pub struct StructuredResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(rename = "marketAnalysis")]
    pub market_analysis: WireMarketAnalysis,
    #[serde(default, rename = "purchaseLikelihood")]
    pub purchase_likelihood: Option<WirePurchaseLikelihood>,
    #[serde(default)]
    pub sources: Vec<WireSource>,
}

#[derive(Debug, Deserialize)]
pub struct WireMarketAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub competition: String,
    #[serde(default, rename = "marketSize")]
    pub market_size: String,
}

#[derive(Debug, Deserialize)]
pub struct WirePurchaseLikelihood {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Deserialize)]
pub struct WireSource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Terminal revision: `{ result, agent, timestamp, session?, query?, demo_mode? }`
#[derive(Debug, Deserialize)]
pub struct TerminalResponse {
    pub result: String,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_timestamp_opt"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session: Option<WireSession>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub demo_mode: bool,
}

#[derive(Debug, Deserialize)]
pub struct WireSession {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub product: String,
}

impl BackendResponse {
    /// Normalize either wire shape into the canonical result.
    ///
    /// `submitted_query` fills in when the response echoes no query, and
    /// `received_at` stamps responses that carry no timestamp of their own.
    pub fn normalize(self, submitted_query: &str, received_at: DateTime<Utc>) -> AnalysisResult {
        match self {
            BackendResponse::Structured(resp) => AnalysisResult {
                query: resp.query.unwrap_or_else(|| submitted_query.to_string()),
                agent: AgentKind::infer(&resp.market_analysis.summary),
                timestamp: received_at,
                market: MarketAnalysis {
                    summary: resp.market_analysis.summary,
                    trends: resp.market_analysis.trends,
                    competition: resp.market_analysis.competition,
                    market_size: resp.market_analysis.market_size,
                },
                likelihood: resp.purchase_likelihood.map(|wire| PurchaseLikelihood {
                    score: wire.score.clamp(0, 100) as u8,
                    factors: wire.factors,
                    recommendation: wire.recommendation,
                }),
                sources: resp
                    .sources
                    .into_iter()
                    .map(|wire| Source { title: wire.title, url: wire.url, kind: wire.kind })
                    .collect(),
                session: None,
                demo: false,
            },
            BackendResponse::Terminal(resp) => {
                let agent = resp
                    .agent
                    .as_deref()
                    .map(AgentKind::from_tag)
                    .unwrap_or_else(|| AgentKind::infer(&resp.result));
                AnalysisResult {
                    query: resp.query.unwrap_or_else(|| submitted_query.to_string()),
                    agent,
                    timestamp: resp.timestamp.unwrap_or(received_at),
                    market: MarketAnalysis { summary: resp.result, ..Default::default() },
                    likelihood: None,
                    sources: Vec::new(),
                    session: resp
                        .session
                        .map(|wire| SessionInfo { active: wire.active, product: wire.product }),
                    demo: resp.demo_mode,
                }
            }
        }
    }
}
