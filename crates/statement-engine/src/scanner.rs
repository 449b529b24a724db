//! Statement boundary scanner
//!
//! Walks the per-page text of a source document, finds statement start/end
//! markers, and resolves each (possibly multi-page) statement to its
//! canonical last page. Pages of a resolved statement are marked consumed
//! and never revisited, so total work is O(n) over document pages.

use std::collections::HashSet;

use statement_types::PageSpan;
use tracing::{debug, warn};

use crate::patterns::{statement_bounds, PAGE_HEADER};

/// A detected statement awaiting extraction from its canonical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub span: PageSpan,
}

impl Candidate {
    /// 1-based canonical page: the last physical page of the statement.
    pub fn canonical_page(&self) -> u32 {
        self.span.last_page()
    }
}

/// Single-pass scanner over a document's page texts.
///
/// The consumed-page set is owned here and scoped to one document run; the
/// pipeline calls [`BoundaryScanner::consume`] only after a candidate's
/// statement data actually extracts, so unextractable pages stay unclaimed.
pub struct BoundaryScanner<'a> {
    pages: &'a [String],
    consumed: HashSet<u32>,
    cursor: u32,
    dropped: usize,
}

impl<'a> BoundaryScanner<'a> {
    pub fn new(pages: &'a [String]) -> Self {
        Self {
            pages,
            consumed: HashSet::new(),
            cursor: 1,
            dropped: 0,
        }
    }

    /// Statements discarded because their declared span ran past the end of
    /// the document.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Text of a 1-based page, if it exists.
    pub fn page_text(&self, page: u32) -> Option<&'a str> {
        self.pages.get(page as usize - 1).map(String::as_str)
    }

    /// Mark every page of a span consumed.
    pub fn consume(&mut self, span: PageSpan) {
        self.consumed.extend(span.pages());
    }

    /// Advance to the next statement candidate, or None when the document is
    /// exhausted. Pages without a page header or without both markers are
    /// non-statement content and are skipped silently.
    pub fn next_candidate(&mut self) -> Option<Candidate> {
        let page_count = self.pages.len() as u32;

        while self.cursor <= page_count {
            let page_num = self.cursor;
            self.cursor += 1;

            if self.consumed.contains(&page_num) {
                continue;
            }
            let text = &self.pages[page_num as usize - 1];

            let Some(caps) = PAGE_HEADER.captures(text) else {
                continue;
            };
            if statement_bounds(text).is_none() {
                continue;
            }

            let current: u32 = caps[1].parse().unwrap_or(0);
            let total: u32 = caps[2].parse().unwrap_or(0);
            if current == 0 || total == 0 || current > total || current > page_num {
                debug!(page = page_num, "malformed page header, skipping page");
                continue;
            }

            let first_page = page_num - (current - 1);
            let span = PageSpan::new(first_page, total);

            if span.last_page() > page_count {
                warn!(
                    first_page,
                    total,
                    page_count,
                    "statement span runs past end of document, dropping statement"
                );
                self.dropped += 1;
                continue;
            }

            return Some(Candidate { span });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn statement_page(current: u32, total: u32, company: &str) -> String {
        format!(
            "Page {current} of {total}\nwww.unitedcorporate.com\n{company}\n123 Main St\nSTATEMENT OF OPEN INVOICE(S)\nInvoice 1 $100.00"
        )
    }

    #[test]
    fn test_single_page_statement_found() {
        let pages = vec![statement_page(1, 1, "Acme Inc")];
        let mut scanner = BoundaryScanner::new(&pages);
        let candidate = scanner.next_candidate().unwrap();
        assert_eq!(candidate.span, PageSpan::new(1, 1));
        assert_eq!(candidate.canonical_page(), 1);
    }

    #[test]
    fn test_multi_page_statement_resolves_to_last_page() {
        let pages = vec![
            statement_page(1, 3, "Acme Inc"),
            statement_page(2, 3, "Acme Inc"),
            statement_page(3, 3, "Acme Inc"),
        ];
        let mut scanner = BoundaryScanner::new(&pages);
        let candidate = scanner.next_candidate().unwrap();
        assert_eq!(candidate.span, PageSpan::new(1, 3));
        assert_eq!(candidate.canonical_page(), 3);
    }

    #[test]
    fn test_consumed_pages_are_not_revisited() {
        let pages = vec![
            statement_page(1, 2, "Acme Inc"),
            statement_page(2, 2, "Acme Inc"),
            statement_page(1, 1, "Beta LLC"),
        ];
        let mut scanner = BoundaryScanner::new(&pages);
        let first = scanner.next_candidate().unwrap();
        scanner.consume(first.span);
        let second = scanner.next_candidate().unwrap();
        assert_eq!(second.span, PageSpan::new(3, 1));
        assert!(scanner.next_candidate().is_none());
    }

    #[test]
    fn test_pages_without_markers_are_skipped() {
        let pages = vec![
            "cover letter, no markers".to_string(),
            "Page 1 of 1\nno start marker\nSTATEMENT OF OPEN INVOICE(S)".to_string(),
            statement_page(1, 1, "Acme Inc"),
        ];
        let mut scanner = BoundaryScanner::new(&pages);
        let candidate = scanner.next_candidate().unwrap();
        assert_eq!(candidate.span, PageSpan::new(3, 1));
    }

    #[test]
    fn test_truncated_statement_is_dropped_and_counted() {
        // Declares 3 pages but the document ends after this one
        let pages = vec![statement_page(1, 3, "Acme Inc")];
        let mut scanner = BoundaryScanner::new(&pages);
        assert!(scanner.next_candidate().is_none());
        assert_eq!(scanner.dropped(), 1);
    }

    #[test]
    fn test_unconsumed_pages_are_revisited() {
        // Candidate found but never consumed: the scanner moves on page by
        // page and may surface the same statement again from page 2.
        let pages = vec![
            statement_page(1, 2, "Acme Inc"),
            statement_page(2, 2, "Acme Inc"),
        ];
        let mut scanner = BoundaryScanner::new(&pages);
        let first = scanner.next_candidate().unwrap();
        assert_eq!(first.span, PageSpan::new(1, 2));
        let again = scanner.next_candidate().unwrap();
        assert_eq!(again.span, PageSpan::new(1, 2));
    }
}
