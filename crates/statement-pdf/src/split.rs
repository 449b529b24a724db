//! Destination-bucket PDF splitting
//!
//! Groups classified statements by destination and writes one new document
//! per non-empty bucket containing exactly those statements' pages, using
//! whitelist-style page extraction.

use std::collections::HashSet;

use lopdf::Document;
use statement_types::{Destination, Statement};
use tracing::warn;

use crate::error::StatementPdfError;

/// One output document for a destination bucket.
#[derive(Debug, Clone)]
pub struct BucketOutput {
    pub destination: Destination,
    pub bytes: Vec<u8>,
    /// Pages copied into this document.
    pub pages_included: usize,
    /// Pages claimed by statements but missing from the source document.
    pub pages_skipped: usize,
}

/// Split the source document into up to four bucket documents, one per
/// non-empty destination.
///
/// A statement page that falls outside the source document is logged and
/// omitted; it never aborts the bucket or the run.
pub fn split_by_destination(
    bytes: &[u8],
    statements: &[Statement],
) -> Result<Vec<BucketOutput>, StatementPdfError> {
    let doc = Document::load_mem(bytes).map_err(|e| StatementPdfError::Parse(e.to_string()))?;
    let page_count = doc.get_pages().len() as u32;

    let mut outputs = Vec::new();
    for destination in Destination::ALL {
        let mut pages = Vec::new();
        let mut skipped = 0usize;

        for statement in statements.iter().filter(|s| s.destination == destination) {
            for page in statement.page_span.pages() {
                if (1..=page_count).contains(&page) {
                    pages.push(page);
                } else {
                    warn!(
                        company = %statement.company_name,
                        page,
                        page_count,
                        "statement page outside source document, omitting"
                    );
                    skipped += 1;
                }
            }
        }

        if pages.is_empty() {
            continue;
        }
        let bytes = copy_pages(&doc, &pages)?;
        outputs.push(BucketOutput {
            destination,
            bytes,
            pages_included: pages.len(),
            pages_skipped: skipped,
        });
    }
    Ok(outputs)
}

/// Build a new document containing only the given 1-based pages.
///
/// Deletes unwanted pages in reverse order so page numbering stays stable,
/// then prunes orphaned objects before serializing.
fn copy_pages(doc: &Document, pages: &[u32]) -> Result<Vec<u8>, StatementPdfError> {
    let page_count = doc.get_pages().len() as u32;
    let keep: HashSet<u32> = pages.iter().copied().collect();

    let mut new_doc = doc.clone();
    let mut to_delete: Vec<u32> = (1..=page_count).filter(|p| !keep.contains(p)).collect();
    to_delete.reverse();
    for page in to_delete {
        new_doc.delete_pages(&[page]);
    }

    new_doc.prune_objects();
    new_doc.compress();

    let mut buffer = Vec::new();
    new_doc
        .save_to(&mut buffer)
        .map_err(|e| StatementPdfError::Operation(format!("save failed: {e}")))?;
    Ok(buffer)
}
