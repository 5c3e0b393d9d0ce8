//! Image-text extractor: recognized text from the OCR collaborator, with
//! debit/credit column awareness learned from the leading lines.

use finsight_core::{PipelineError, TxnKind, UNKNOWN_DATE};

use super::document::extract_document_text;
use super::scan::{MIN_LINE_LEN, scan_line, token_patterns};
use crate::classify::keyword_kind;
use crate::types::RawRecord;

/// Leading lines inspected for "debit" / "credit" column headers.
const HEADER_PROBE_LINES: usize = 5;

/// Parse recognized statement text.
///
/// First pass understands separate debit/credit columns when the leading
/// lines advertise them; otherwise (or when that pass yields nothing) the
/// plain document-text heuristic runs. Only when both passes produce nothing
/// does the extractor fail.
pub fn extract_image_text(text: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let mut out = if has_debit_credit_columns(text) {
        parse_split_column_lines(text)?
    } else {
        Vec::new()
    };

    if out.is_empty() {
        out = extract_document_text(text).unwrap_or_default();
    }
    if out.is_empty() {
        return Err(PipelineError::ExtractionFailure(
            "recognized text yielded no usable transactions".to_string(),
        ));
    }
    Ok(out)
}

fn has_debit_credit_columns(text: &str) -> bool {
    let head = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(HEADER_PROBE_LINES)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    head.contains("debit") && head.contains("credit")
}

fn parse_split_column_lines(text: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let (date_re, amount_re) = token_patterns()?;

    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.len() < MIN_LINE_LEN {
            continue;
        }
        let lower = line.to_lowercase();
        // the column header row itself
        if lower.contains("debit") && lower.contains("credit") {
            continue;
        }

        let scan = scan_line(line, &date_re, &amount_re);
        let n = scan.amounts.len();
        if n == 0 {
            continue;
        }

        let (amount, declared) = if n >= 3 {
            // last figure is the running balance; the two before it are the
            // debit and credit columns in that order
            let debit = scan.amounts[n - 3].1;
            let credit = scan.amounts[n - 2].1;
            if debit != 0.0 {
                (debit, "debit")
            } else {
                (credit, "credit")
            }
        } else if n == 2 {
            // one real figure plus the balance; wording decides the column
            let declared = match keyword_kind(&scan.description) {
                Some(TxnKind::Income) => "credit",
                _ => "debit",
            };
            (scan.amounts[0].1, declared)
        } else {
            (scan.amounts[0].1, "")
        };

        let mut raw = RawRecord::new();
        raw.push("date", scan.date.as_deref().unwrap_or(UNKNOWN_DATE));
        raw.push("description", &scan.description);
        raw.push("amount", &amount.to_string());
        if !declared.is_empty() {
            raw.push("type", declared);
        }
        out.push(raw);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLIT_COLUMN: &str = r#"
STATE BANK
Date Description Debit Credit Balance
01/02/2024 ATM CASH 2000.00 0.00 48000.00
05/02/2024 SALARY FEB 0.00 50000.00 98000.00
"#;

    #[test]
    fn test_split_columns_pick_debit_or_credit() {
        let records = extract_image_text(SPLIT_COLUMN).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].get("amount"), Some("2000"));
        assert_eq!(records[0].get("type"), Some("debit"));

        assert_eq!(records[1].get("amount"), Some("50000"));
        assert_eq!(records[1].get("type"), Some("credit"));
    }

    #[test]
    fn test_two_figures_decided_by_wording() {
        let text = "Debit Credit summary\n03/02/2024 INTEREST DEPOSIT 120.00 98120.00\n03/02/2024 SHOP CHARGE 450.00 97670.00\n";
        let records = extract_image_text(text).unwrap();
        assert_eq!(records[0].get("type"), Some("credit"));
        assert_eq!(records[0].get("amount"), Some("120"));
        assert_eq!(records[1].get("type"), Some("debit"));
        assert_eq!(records[1].get("amount"), Some("450"));
    }

    #[test]
    fn test_two_figures_with_neutral_wording_default_to_debit() {
        // "FUNDS XFER" matches neither keyword family
        let text = "Debit Credit summary\n03/02/2024 FUNDS XFER 450.00 97670.00\n";
        let records = extract_image_text(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("type"), Some("debit"));
        assert_eq!(records[0].get("amount"), Some("450"));
    }

    #[test]
    fn test_falls_back_to_document_heuristic() {
        // no debit/credit header anywhere: plain line parse applies
        let records = extract_image_text("04/02/2024 CASH MACHINE 900.00").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("amount"), Some("900"));
        assert_eq!(records[0].get("type"), None);
    }

    #[test]
    fn test_unusable_text_is_extraction_failure() {
        assert!(matches!(
            extract_image_text("completely unrelated words only"),
            Err(PipelineError::ExtractionFailure(_))
        ));
    }
}
