use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which research agent produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Product,
    News,
    General,
}

impl AgentKind {
    /// Wire tag as emitted by the backend (`"PRODUCT"`, `"NEWS"`, ...)
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Product => "PRODUCT",
            AgentKind::News => "NEWS",
            AgentKind::General => "GENERAL",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "PRODUCT" => AgentKind::Product,
            "NEWS" => AgentKind::News,
            _ => AgentKind::General,
        }
    }

    /// Fall back to the banner text inside the summary when a response
    /// carries no agent tag (mirrors how the backend itself labels results).
    pub fn infer(summary: &str) -> Self {
        if summary.contains("PRODUCT MARKET ANALYSIS") {
            AgentKind::Product
        } else if summary.contains("STOCK ANALYSIS") || summary.contains("NEWS ANALYSIS") {
            AgentKind::News
        } else {
            AgentKind::General
        }
    }
}

/// Market-analysis block of a result. Fields other than `summary` may be
/// empty when the backend responded in its terminal-report shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub summary: String,
    pub trends: Vec<String>,
    pub competition: String,
    pub market_size: String,
}

/// Purchase-likelihood assessment; optional in some backend revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLikelihood {
    /// 0–100
    pub score: u8,
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// A cited research source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub kind: String,
}

/// Conversational-memory state mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub active: bool,
    pub product: String,
}

/// Connectivity indicators from `GET /status`. Missing fields read as
/// offline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub aws: bool,
    #[serde(default)]
    pub google: bool,
    #[serde(default)]
    pub news: bool,
}

/// Canonical analysis result, normalized from whichever wire shape the
/// backend answered with. Request-scoped; nothing here persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    pub agent: AgentKind,
    pub timestamp: DateTime<Utc>,
    pub market: MarketAnalysis,
    pub likelihood: Option<PurchaseLikelihood>,
    pub sources: Vec<Source>,
    pub session: Option<SessionInfo>,
    /// True for locally generated demonstration results
    pub demo: bool,
}
