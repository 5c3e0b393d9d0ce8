//! Pipeline facade: bytes plus a format hint in, analysis snapshot out.
//!
//! Extraction of document and image formats needs external text services;
//! they are injected as trait objects so the pipeline itself stays free of
//! engine dependencies. Runs are idempotent: same bytes, same result.

use finsight_core::{AnalysisResult, PipelineError, Transaction};
use finsight_ingest::{
    DocumentTextSource, StatementFormat, TextRecognizer, classify, extract_delimited,
    extract_document_text, extract_image_text, extract_spreadsheet, normalize,
};

use crate::analytics::analyze;

/// One configured ingestion pipeline. Stateless across runs.
#[derive(Default)]
pub struct StatementPipeline {
    document_source: Option<Box<dyn DocumentTextSource>>,
    recognizer: Option<Box<dyn TextRecognizer>>,
}

impl StatementPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the PDF-to-text collaborator required for document statements.
    pub fn with_document_source(mut self, source: Box<dyn DocumentTextSource>) -> Self {
        self.document_source = Some(source);
        self
    }

    /// Attach the OCR collaborator required for photographed statements.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Extract, normalize and classify one statement.
    pub fn extract_transactions(
        &self,
        bytes: &[u8],
        format_hint: &str,
    ) -> Result<Vec<Transaction>, PipelineError> {
        let format = StatementFormat::from_hint(format_hint)?;

        let records = match format {
            StatementFormat::Delimited { delimiter } => extract_delimited(bytes, delimiter)?,
            StatementFormat::Spreadsheet => extract_spreadsheet(bytes)?,
            StatementFormat::Document => {
                let source = self.document_source.as_ref().ok_or_else(|| {
                    PipelineError::ExtractionFailure(
                        "no document text service configured".to_string(),
                    )
                })?;
                let text = source
                    .extract_text(bytes)
                    .map_err(|e| PipelineError::extraction("document text service", e))?;
                extract_document_text(&text)?
            }
            StatementFormat::Image => {
                let recognizer = self.recognizer.as_ref().ok_or_else(|| {
                    PipelineError::ExtractionFailure(
                        "no text recognition service configured".to_string(),
                    )
                })?;
                let text = recognizer
                    .recognize(bytes)
                    .map_err(|e| PipelineError::extraction("text recognition", e))?;
                extract_image_text(&text)?
            }
        };

        let transactions: Vec<Transaction> =
            records.iter().filter_map(normalize).map(|row| classify(&row)).collect();

        if transactions.is_empty() {
            return Err(PipelineError::EmptyInput(
                "every extracted row was dropped during normalization; \
                 expected date, description and amount fields"
                    .to_string(),
            ));
        }
        Ok(transactions)
    }

    /// Full run: extraction through analytics.
    pub fn run(&self, bytes: &[u8], format_hint: &str) -> Result<AnalysisResult, PipelineError> {
        let transactions = self.extract_transactions(bytes, format_hint)?;
        Ok(analyze(&transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::TxnKind;

    #[test]
    fn test_csv_run_end_to_end() {
        let csv = b"date,description,amount,type\n2024-01-05,SALARY JAN,50000,credit\n2024-01-10,RENT,12000,debit\n";
        let pipeline = StatementPipeline::new();
        let txns = pipeline.extract_transactions(csv, "csv").unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].kind, TxnKind::Income);
        assert_eq!(txns[1].kind, TxnKind::Expense);

        let analysis = pipeline.run(csv, "csv").unwrap();
        assert_eq!(analysis.total_income, 50_000.0);
        assert_eq!(analysis.total_expenses, 12_000.0);
        assert_eq!(analysis.savings, 38_000.0);
    }

    #[test]
    fn test_tsv_hint_runs_end_to_end() {
        let tsv = b"date\tdescription\tamount\ttype\n2024-01-05\tSALARY JAN\t50000\tcredit\n2024-01-10\tRENT\t12000\tdebit\n";
        let pipeline = StatementPipeline::new();
        let analysis = pipeline.run(tsv, "tsv").unwrap();
        assert_eq!(analysis.total_income, 50_000.0);
        assert_eq!(analysis.total_expenses, 12_000.0);
    }

    #[test]
    fn test_unsupported_hint() {
        let pipeline = StatementPipeline::new();
        assert!(matches!(
            pipeline.run(b"whatever", "docx"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_collaborators_fail_extraction() {
        let pipeline = StatementPipeline::new();
        assert!(matches!(
            pipeline.run(b"%PDF-", "pdf"),
            Err(PipelineError::ExtractionFailure(_))
        ));
        assert!(matches!(
            pipeline.run(b"\x89PNG", "png"),
            Err(PipelineError::ExtractionFailure(_))
        ));
    }

    #[test]
    fn test_rows_without_amounts_are_empty_input() {
        let csv = b"date,description\n2024-01-05,opening balance note\n";
        let pipeline = StatementPipeline::new();
        assert!(matches!(
            pipeline.run(csv, "csv"),
            Err(PipelineError::EmptyInput(_))
        ));
    }
}
