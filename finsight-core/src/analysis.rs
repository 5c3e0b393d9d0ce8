//! Aggregate analysis snapshot types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income/expense totals for one calendar month present in the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// "YYYY-MM"
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub transaction_count: usize,
}

/// A (description, rounded amount) group that occurred at least twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPattern {
    pub description: String,
    /// Amount rounded to the nearest whole unit; the grouping key.
    pub amount: f64,
    pub occurrence_count: usize,
    pub dates: Vec<String>,
}

/// Span of parseable transaction dates. When nothing parses, both ends
/// default to the analysis date and `days_span` is 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_span: i64,
}

/// Everything the analytics engine derives from one classified transaction
/// list. Produced once per upload, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Signed: income minus expenses.
    pub savings: f64,
    pub date_range: DateRange,
    /// Continuous approximation (days / 30), floored at 1. Not a calendar
    /// month count.
    pub months_span: f64,
    pub average_monthly_income: f64,
    pub average_monthly_expenses: f64,
    pub savings_per_month: f64,
    /// Percent of monthly income saved; 0 when income is 0.
    pub savings_rate: f64,
    pub monthly_buckets: Vec<MonthlyBucket>,
    /// 0-100, higher = steadier monthly income.
    pub income_consistency_score: f64,
    /// 0-100, higher = more stable spending (inverted volatility).
    pub spending_volatility_score: f64,
    /// Months of expenses covered by accumulated savings.
    pub emergency_savings_buffer: f64,
    pub recurring_patterns: Vec<RecurringPattern>,
    /// Coarse binary proxy: 100 when any recurring pattern exists, else 50.
    pub bill_payment_regularity: f64,
    pub monthly_debt_obligations: f64,
    pub transaction_count: usize,
}
