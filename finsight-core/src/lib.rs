//! finsight-core: shared domain types for the statement analysis pipeline.

pub mod analysis;
pub mod eligibility;
pub mod error;
pub mod transaction;

pub use analysis::{AnalysisResult, DateRange, MonthlyBucket, RecurringPattern};
pub use eligibility::{EligibilityResult, MetricsSnapshot, RiskTier, ScoringPolicy};
pub use error::PipelineError;
pub use transaction::{Transaction, TxnKind, UNKNOWN_DATE, parse_statement_date};
