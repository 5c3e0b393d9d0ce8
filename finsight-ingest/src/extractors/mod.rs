//! Format-specific extractors. Each turns one input into an ordered sequence
//! of [`RawRecord`](crate::types::RawRecord)s, failing deterministically when
//! the file-level parse itself errors.

pub mod delimited;
pub mod document;
pub mod image;
mod scan;
pub mod spreadsheet;

pub use delimited::extract_delimited;
pub use document::extract_document_text;
pub use image::extract_image_text;
pub use spreadsheet::extract_spreadsheet;
