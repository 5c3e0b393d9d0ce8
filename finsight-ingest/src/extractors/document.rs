//! Document-text extractor: free text from a PDF-to-text service into raw
//! records, one transaction-shaped line at a time.

use finsight_core::{PipelineError, UNKNOWN_DATE};

use super::scan::{MIN_LINE_LEN, is_header_line, scan_line, token_patterns};
use crate::types::RawRecord;

/// Heuristic line-by-line parse of extracted statement text.
///
/// Lines yielding no plausible amount are dropped, not failed. The rightmost
/// amount-shaped token on a line is taken as the transaction amount; on
/// statements that print a trailing running balance this reads the balance
/// instead, and free text carries no layout signal to tell the two apart.
pub fn extract_document_text(text: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let (date_re, amount_re) = token_patterns()?;

    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.len() < MIN_LINE_LEN {
            continue;
        }

        let scan = scan_line(line, &date_re, &amount_re);
        // Header/label lines carry column words but no date token
        if scan.date.is_none() && is_header_line(line) {
            continue;
        }
        let Some((_, amount)) = scan.amounts.last() else {
            continue;
        };

        let mut raw = RawRecord::new();
        raw.push("date", scan.date.as_deref().unwrap_or(UNKNOWN_DATE));
        raw.push("description", &scan.description);
        raw.push("amount", &amount.to_string());
        out.push(raw);
    }

    if out.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no transaction-shaped lines found in document text".to_string(),
        ));
    }
    Ok(out)
}
