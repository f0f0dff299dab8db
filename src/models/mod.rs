//! Data models for research queries and analysis results.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`AnalysisResult`] - Canonical, shape-normalized research result
//! - [`MarketAnalysis`] / [`PurchaseLikelihood`] / [`Source`] - Result sections
//! - [`SessionInfo`] - Conversational-memory mirror
//! - [`StatusReport`] - Backend connectivity indicators
//! - [`BackendResponse`] - Untagged union of the accepted wire shapes
//!
//! Wire deserialization uses serde with custom deserializers for timestamp
//! drift between backend revisions (see `parsers::deserializers`).

pub mod analysis;
pub mod wire;

pub use analysis::{
    AgentKind, AnalysisResult, MarketAnalysis, PurchaseLikelihood, SessionInfo, Source,
    StatusReport,
};
pub use wire::BackendResponse;
