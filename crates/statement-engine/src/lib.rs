//! Statement classification engine
//!
//! Routes scanned financial statements to output buckets by matching each
//! statement's company name against a do-not-mail reference list: boundary
//! scan, 4-tier name extraction, exact/normalized/fuzzy matching, destination
//! classification, and an interactive review session for ambiguous matches.

pub mod classify;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod patterns;
pub mod reference;
pub mod report;
pub mod review;
pub mod scanner;

use tracing::info;

pub use error::{EngineError, ReviewError};
pub use reference::ReferenceList;
pub use report::{build_report, Report, ReportEntry};
pub use review::{Question, ReviewSession, SubmitOutcome};

use statement_types::Statement;

/// Classified statements from one document, plus the count of statements
/// dropped for running past the end of the document.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub statements: Vec<Statement>,
    pub dropped: usize,
}

/// Single-document, single-pass classification pipeline.
///
/// Holds only a borrowed reference list; all per-run state (consumed pages,
/// statements) is scoped to one [`ClassificationEngine::process`] call, so
/// separate documents can be processed against the same list independently.
pub struct ClassificationEngine<'a> {
    reference: &'a ReferenceList,
}

impl<'a> ClassificationEngine<'a> {
    pub fn new(reference: &'a ReferenceList) -> Self {
        Self { reference }
    }

    /// Classify every statement in a document, given its per-page text.
    pub fn process(&self, pages: &[String]) -> PipelineOutput {
        let mut scanner = scanner::BoundaryScanner::new(pages);
        let mut statements = Vec::new();

        while let Some(candidate) = scanner.next_candidate() {
            let Some(page_text) = scanner.page_text(candidate.canonical_page()) else {
                continue;
            };
            // The canonical page must itself parse as a statement page;
            // otherwise the candidate is discarded and its pages stay
            // unclaimed.
            let Some(block) = extract::statement_block(page_text) else {
                continue;
            };

            let extraction = extract::extract_company_name(page_text, &block.lines);
            let matches = matcher::match_company(self.reference, &extraction.company_name);
            let location = classify::detect_location(&block.body);
            let classification = classify::classify(
                &matches,
                &block.body,
                location,
                candidate.span.total_pages,
            );

            let fallback_name = if extraction.company_name.trim() != extraction.fallback_name.trim()
            {
                Some(extraction.fallback_name)
            } else {
                None
            };

            info!(
                company = %extraction.company_name,
                destination = classification.destination.label(),
                method = ?extraction.method,
                pages = %candidate.span.range_label(),
                "statement classified"
            );

            statements.push(Statement {
                company_name: extraction.company_name,
                fallback_name,
                extraction_method: extraction.method,
                exact_match: matches.exact_match,
                similar_matches: matches.similar_matches,
                location,
                page_span: candidate.span,
                manual_required: classification.manual_required,
                ask_question: classification.ask_question,
                destination: classification.destination,
                user_answer: None,
            });
            scanner.consume(candidate.span);
        }

        let dropped = scanner.dropped();
        info!(
            statements = statements.len(),
            dropped, "document classification complete"
        );
        PipelineOutput {
            statements,
            dropped,
        }
    }
}
