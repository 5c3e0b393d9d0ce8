//! Token scanning shared by the document-text and image-text extractors.

use finsight_core::PipelineError;
use regex::Regex;

use crate::normalize::parse_signed_amount;

/// Lines shorter than this are decorative (page numbers, separators).
pub const MIN_LINE_LEN: usize = 8;

/// Words that mark header/label lines rather than transactions.
const HEADER_WORDS: &[&str] = &[
    "date",
    "description",
    "balance",
    "particulars",
    "narration",
    "statement",
    "opening",
    "closing",
];

/// A line decomposed into date token, amount tokens and remaining text.
#[derive(Debug, Clone)]
pub struct ScannedLine {
    pub date: Option<String>,
    pub description: String,
    /// (source token, parsed value) in left-to-right order.
    pub amounts: Vec<(String, f64)>,
}

/// Compile the date-shaped and amount-shaped token patterns.
pub fn token_patterns() -> Result<(Regex, Regex), PipelineError> {
    // digits/digits/digits with a 2-4 digit year, or ISO year-first
    let date_re = Regex::new(r"^(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{1,2}-\d{1,2})$")
        .map_err(|e| PipelineError::extraction("compiling date pattern", e))?;
    // optional sign/currency, digit groups, optional decimal
    let amount_re = Regex::new(r"^[-+]?[$€£₹]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$")
        .map_err(|e| PipelineError::extraction("compiling amount pattern", e))?;
    Ok((date_re, amount_re))
}

/// Split a line on whitespace and bucket each token as date, amount or
/// description text. The first date-shaped token wins; later ones are left
/// in the description.
pub fn scan_line(line: &str, date_re: &Regex, amount_re: &Regex) -> ScannedLine {
    let mut date = None;
    let mut amounts = Vec::new();
    let mut desc_words: Vec<&str> = Vec::new();

    for token in line.split_whitespace() {
        if date.is_none() && date_re.is_match(token) {
            date = Some(token.to_string());
            continue;
        }
        if amount_re.is_match(token) {
            if let Some(value) = parse_signed_amount(token) {
                amounts.push((token.to_string(), value));
                continue;
            }
        }
        desc_words.push(token);
    }

    ScannedLine {
        date,
        description: desc_words.join(" "),
        amounts,
    }
}

/// True for lines that read like column headers or statement labels.
pub fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_WORDS.iter().any(|w| lower.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_typical_statement_line() {
        let (date_re, amount_re) = token_patterns().unwrap();
        let scan = scan_line(
            "05/01/2024 GROCERY MART PURCHASE 1,500.00 48,500.00",
            &date_re,
            &amount_re,
        );
        assert_eq!(scan.date.as_deref(), Some("05/01/2024"));
        assert_eq!(scan.description, "GROCERY MART PURCHASE");
        let values: Vec<f64> = scan.amounts.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1500.0, 48_500.0]);
    }

    #[test]
    fn test_scan_keeps_reference_codes_in_description() {
        let (date_re, amount_re) = token_patterns().unwrap();
        // "UPI/4021" is neither date- nor amount-shaped
        let scan = scan_line("01-02-2024 UPI/4021 TRANSFER 900", &date_re, &amount_re);
        assert_eq!(scan.date.as_deref(), Some("01-02-2024"));
        assert_eq!(scan.description, "UPI/4021 TRANSFER");
        assert_eq!(scan.amounts.len(), 1);
        assert_eq!(scan.amounts[0].1, 900.0);
    }

    #[test]
    fn test_negative_and_currency_tokens() {
        let (date_re, amount_re) = token_patterns().unwrap();
        let scan = scan_line("02/01/2024 REFUND -15.00 $53.70", &date_re, &amount_re);
        let values: Vec<f64> = scan.amounts.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![-15.0, 53.70]);
    }

    #[test]
    fn test_header_line_detection() {
        assert!(is_header_line("Date Description Amount Balance"));
        assert!(is_header_line("ACCOUNT STATEMENT for March"));
        assert!(!is_header_line("ATM WITHDRAWAL 500.00"));
    }
}
