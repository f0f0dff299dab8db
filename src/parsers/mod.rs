//! Report and wire-format parsing.
//!
//! # Error Handling Strategy
//!
//! The report converter follows a **graceful degradation** approach: every
//! input line falls into exactly one handled case, so conversion never
//! fails. Unrecognized content passes through verbatim and malformed rows
//! are dropped rather than aborting the render. Wire deserialization uses
//! lenient custom deserializers so that timestamp format drift between
//! backend revisions does not reject an otherwise usable response.

pub mod deserializers;
pub mod report;

pub use report::to_markdown;
