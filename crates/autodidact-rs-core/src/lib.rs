//! Chat pipeline for Autodidact.
//!
//! This crate owns the code pattern scanner, the improvement applier, the
//! knowledge extractor, and the [`Assistant`] facade that composes chat
//! responses from search results and analysis findings.

pub mod analysis;
pub mod assistant;
pub mod error;
pub mod improve;
pub mod knowledge;
pub mod messages;

/// Chat pipeline facade.
pub use assistant::{Assistant, RESPONSE_APPLY_LIMIT, RESPONSE_PREVIEW_LIMIT};
/// Code pattern scanner.
pub use analysis::CodeScanner;
pub use error::CoreError;
/// Improvement dispatch.
pub use improve::{ImprovementAction, ImprovementApplier, action_for};
/// Knowledge extraction from uploaded files.
pub use knowledge::KnowledgeExtractor;
