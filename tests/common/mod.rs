//! Shared test utilities for integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use market_lens::client::BackendClient;
use market_lens::models::{
    AgentKind, AnalysisResult, MarketAnalysis, PurchaseLikelihood, SessionInfo, Source,
};
use market_lens::session::ResearchSession;

/// A base URL nothing listens on: network calls fail fast and
/// deterministically (connection refused, never a live backend).
pub const DEAD_BACKEND_URL: &str = "http://127.0.0.1:1";

/// A session whose backend is guaranteed unreachable
pub fn offline_session() -> ResearchSession {
    ResearchSession::with_client(BackendClient::new(DEAD_BACKEND_URL).unwrap())
}

pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
}

/// Builder for canonical analysis results
pub struct ResultBuilder {
    result: AnalysisResult,
}

impl ResultBuilder {
    pub fn new(query: &str) -> Self {
        Self {
            result: AnalysisResult {
                query: query.to_string(),
                agent: AgentKind::General,
                timestamp: fixed_timestamp(),
                market: MarketAnalysis {
                    summary: "Plain summary.".to_string(),
                    ..Default::default()
                },
                likelihood: None,
                sources: Vec::new(),
                session: None,
                demo: false,
            },
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.result.market.summary = summary.to_string();
        self
    }

    pub fn trends(mut self, trends: &[&str]) -> Self {
        self.result.market.trends = trends.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn likelihood(mut self, score: u8, recommendation: &str) -> Self {
        self.result.likelihood = Some(PurchaseLikelihood {
            score,
            factors: Vec::new(),
            recommendation: recommendation.to_string(),
        });
        self
    }

    pub fn source(mut self, title: &str, url: &str, kind: &str) -> Self {
        self.result.sources.push(Source {
            title: title.to_string(),
            url: url.to_string(),
            kind: kind.to_string(),
        });
        self
    }

    pub fn session(mut self, product: &str) -> Self {
        self.result.session =
            Some(SessionInfo { active: true, product: product.to_string() });
        self
    }

    pub fn build(self) -> AnalysisResult {
        self.result
    }
}
