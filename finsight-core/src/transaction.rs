//! Canonical transaction record produced by the ingestion stages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money movement. Sign information lives here, never in the
/// amount itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// A classified statement transaction.
///
/// `date` is kept as the raw source string (best effort, may be "unknown");
/// calendar math parses it lazily via [`Transaction::parsed_date`] so that a
/// bad date never costs us the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    /// Always >= 0; see [`TxnKind`].
    pub amount: f64,
    pub kind: TxnKind,
}

/// Placeholder date for rows where no date column or token resolved.
pub const UNKNOWN_DATE: &str = "unknown";

/// Accepted statement date formats, tried in order. Day-first variants come
/// before month-first: the statements this pipeline was built against write
/// 05/01/2024 for January 5th.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d/%m/%y",
    "%m/%d/%y",
];

/// Best-effort parse of a statement date string.
pub fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN_DATE {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

impl Transaction {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.date)
    }

    /// "YYYY-MM" bucket key, None when the date does not parse.
    pub fn month_key(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y-%m").to_string())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(
            parse_statement_date("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_statement_date("05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_statement_date("05-01-2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_unknown_and_garbage_dates() {
        assert_eq!(parse_statement_date("unknown"), None);
        assert_eq!(parse_statement_date(""), None);
        assert_eq!(parse_statement_date("not a date"), None);
    }

    #[test]
    fn test_month_key() {
        let txn = Transaction {
            date: "2024-03-17".to_string(),
            description: "SALARY CREDIT".to_string(),
            amount: 50000.0,
            kind: TxnKind::Income,
        };
        assert_eq!(txn.month_key(), Some("2024-03".to_string()));
        assert!(txn.is_income());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TxnKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }
}
