//! Raw record model, format dispatch and external collaborator traits.

use finsight_core::PipelineError;

/// One loosely-typed row as it came out of an extractor: canonicalized field
/// names mapped to trimmed string values, in source column order. Ephemeral;
/// consumed by the normalizer within the same pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

/// Trim and case-fold a header name.
pub fn canonical_header(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: &str) {
        self.fields
            .push((canonical_header(name), value.trim().to_string()));
    }

    /// First value stored under the canonical form of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = canonical_header(name);
        self.fields
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in source column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

/// Statement input formats the pipeline ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Delimited { delimiter: u8 },
    Spreadsheet,
    Document,
    Image,
}

impl StatementFormat {
    /// Resolve an extension-style hint ("csv", ".XLSX", "pdf", "jpg"...).
    pub fn from_hint(hint: &str) -> Result<Self, PipelineError> {
        let key = hint.trim().trim_start_matches('.').to_lowercase();
        match key.as_str() {
            "csv" | "txt" => Ok(StatementFormat::Delimited { delimiter: b',' }),
            "tsv" => Ok(StatementFormat::Delimited { delimiter: b'\t' }),
            "xlsx" | "xls" => Ok(StatementFormat::Spreadsheet),
            "pdf" => Ok(StatementFormat::Document),
            "png" | "jpg" | "jpeg" | "bmp" | "webp" | "tiff" => Ok(StatementFormat::Image),
            _ => Err(PipelineError::UnsupportedFormat(hint.trim().to_string())),
        }
    }
}

/// External PDF-to-text service. The pipeline only consumes its text output.
pub trait DocumentTextSource {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

/// External optical text recognition engine, treated as a black box.
pub trait TextRecognizer {
    fn recognize(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_canonicalizes_names() {
        let mut record = RawRecord::new();
        record.push("  Transaction Amount ", " 1,200.00 ");
        assert_eq!(record.get("transaction amount"), Some("1,200.00"));
        assert_eq!(record.get("TRANSACTION AMOUNT"), Some("1,200.00"));
        assert_eq!(record.get("amount"), None);
    }

    #[test]
    fn test_blank_record() {
        let mut record = RawRecord::new();
        record.push("date", "   ");
        record.push("amount", "");
        assert!(record.is_blank());
        record.push("amount", "5");
        assert!(!record.is_blank());
    }

    #[test]
    fn test_format_hints() {
        assert_eq!(
            StatementFormat::from_hint(".CSV").unwrap(),
            StatementFormat::Delimited { delimiter: b',' }
        );
        assert_eq!(
            StatementFormat::from_hint("tsv").unwrap(),
            StatementFormat::Delimited { delimiter: b'\t' }
        );
        assert_eq!(
            StatementFormat::from_hint("xlsx").unwrap(),
            StatementFormat::Spreadsheet
        );
        assert_eq!(
            StatementFormat::from_hint("pdf").unwrap(),
            StatementFormat::Document
        );
        assert_eq!(
            StatementFormat::from_hint("jpeg").unwrap(),
            StatementFormat::Image
        );
        assert!(matches!(
            StatementFormat::from_hint("docx"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }
}
