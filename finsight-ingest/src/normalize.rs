//! Column/field resolution: heterogeneous raw records into one canonical
//! per-transaction tuple.

use finsight_core::UNKNOWN_DATE;

use crate::types::RawRecord;

/// Header variants that carry the transaction amount, in priority order.
pub const AMOUNT_ALIASES: &[&str] = &[
    "amount",
    "transaction amount",
    "amt",
    "value",
    "money",
    "withdrawal amount",
    "deposit amount",
    "debit",
    "credit",
];

/// Header variants that carry the narrative text, in priority order.
pub const DESCRIPTION_ALIASES: &[&str] = &[
    "description",
    "narration",
    "details",
    "particulars",
    "transaction details",
    "remarks",
    "memo",
    "payee",
];

/// Header variants that carry a declared debit/credit marker.
pub const TYPE_ALIASES: &[&str] = &[
    "type",
    "transaction type",
    "dr/cr",
    "cr/dr",
    "debit/credit",
];

/// Header variants that carry the transaction date, in priority order.
pub const DATE_ALIASES: &[&str] = &[
    "date",
    "transaction date",
    "txn date",
    "value date",
    "posting date",
    "posted date",
    "booking date",
];

/// Magnitudes at or above this are assumed to be reference/ID numbers that
/// leaked into a value column, not amounts.
const MAX_PLAUSIBLE_AMOUNT: f64 = 100_000_000.0;

/// The canonical tuple handed to the classifier. `amount` keeps its source
/// sign; `declared_type` is the trimmed, case-folded marker ("" when absent).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub declared_type: String,
}

/// Resolve one raw record, or None when no amount can be found (decorative
/// and blank rows are dropped, never treated as errors).
pub fn normalize(record: &RawRecord) -> Option<NormalizedRow> {
    let amount = resolve_amount(record)?;
    let date = first_alias(record, DATE_ALIASES)
        .unwrap_or(UNKNOWN_DATE)
        .to_string();
    let description = first_alias(record, DESCRIPTION_ALIASES)
        .unwrap_or("")
        .to_string();
    let declared_type = first_alias(record, TYPE_ALIASES)
        .map(|t| t.trim().to_lowercase())
        .unwrap_or_default();

    Some(NormalizedRow {
        date,
        description,
        amount,
        declared_type,
    })
}

fn first_alias<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|name| record.get(name).filter(|v| !v.is_empty()))
}

fn resolve_amount(record: &RawRecord) -> Option<f64> {
    if let Some(raw) = first_alias(record, AMOUNT_ALIASES) {
        return parse_signed_amount(raw);
    }
    // No amount-like column matched: take the first remaining field that
    // parses as a plausible magnitude. Fields named like dates or reference
    // numbers are excluded up front.
    record
        .fields()
        .filter(|(name, _)| {
            !name.contains("date") && !name.contains("id") && !name.contains("no")
        })
        .find_map(|(_, value)| {
            parse_signed_amount(value).filter(|v| v.abs() < MAX_PLAUSIBLE_AMOUNT)
        })
}

/// Parse a money string, tolerating thousands separators, currency symbols
/// and surrounding whitespace. Sign is preserved.
pub fn parse_signed_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£' | '₹' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
