//! Per-page text extraction
//!
//! Decodes the source document once and returns one text blob per page, in
//! page order, for the classification engine.

use lopdf::Document;
use tracing::debug;

use crate::error::StatementPdfError;

/// Extract the text of every page of a PDF, in order.
///
/// A page whose text cannot be decoded yields an empty string: the scanner
/// treats it as non-statement content rather than failing the run.
pub fn extract_page_texts(bytes: &[u8]) -> Result<Vec<String>, StatementPdfError> {
    let doc = Document::load_mem(bytes).map_err(|e| StatementPdfError::Parse(e.to_string()))?;
    let page_count = doc.get_pages().len() as u32;

    let mut pages = Vec::with_capacity(page_count as usize);
    for page in 1..=page_count {
        match doc.extract_text(&[page]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                debug!(page, error = %e, "page text extraction failed, treating as empty");
                pages.push(String::new());
            }
        }
    }
    Ok(pages)
}
