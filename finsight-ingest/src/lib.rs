//! finsight-ingest: statement extraction (delimited text, spreadsheets,
//! document text, recognized image text), column-alias normalization and
//! income/expense classification.

pub mod classify;
pub mod extractors;
pub mod normalize;
pub mod types;

pub use classify::{CLASSIFY_RULES, classify, keyword_kind};
pub use extractors::{
    extract_delimited, extract_document_text, extract_image_text, extract_spreadsheet,
};
pub use normalize::{NormalizedRow, normalize, parse_signed_amount};
pub use types::{DocumentTextSource, RawRecord, StatementFormat, TextRecognizer};
