//! Delimited-text (CSV/TSV) extractor.
//!
//! Tolerant of malformed lines: bad rows are skipped with a stderr
//! diagnostic, never abort the whole parse.

use finsight_core::PipelineError;

use crate::types::{RawRecord, canonical_header};

/// Parse delimited bytes into header-keyed raw records. The delimiter comes
/// from the format hint (`,` for csv/txt, `\t` for tsv).
pub fn extract_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<RawRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| PipelineError::extraction("reading delimited header", e))?
        .iter()
        .map(canonical_header)
        .collect();

    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("skipping malformed row {}: {}", idx + 2, e);
                continue;
            }
        };

        let mut raw = RawRecord::new();
        for (i, value) in record.iter().enumerate() {
            if let Some(name) = headers.get(i) {
                if name.is_empty() {
                    continue;
                }
                raw.push(name, value);
            }
        }
        if raw.is_blank() {
            continue;
        }
        out.push(raw);
    }

    if out.is_empty() {
        return Err(PipelineError::EmptyInput(
            "delimited statement had no data rows; expected columns like date, description, amount"
                .to_string(),
        ));
    }
    Ok(out)
}
