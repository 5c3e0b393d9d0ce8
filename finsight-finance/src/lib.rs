//! finsight-finance: analytics engine, eligibility scorer and the statement
//! pipeline facade.

pub mod analytics;
pub mod pipeline;
pub mod scoring;

pub use analytics::{analyze, analyze_as_of};
pub use pipeline::StatementPipeline;
pub use scoring::score_eligibility;
