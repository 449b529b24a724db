//! Structured run report
//!
//! Serializable summary of a pipeline run: one record per statement with
//! every classification field, plus run-level counts. Consumed by the I/O
//! layer (written as JSON by the CLI).

use chrono::{DateTime, Utc};
use serde::Serialize;
use statement_types::{
    Destination, ExtractionMethod, Location, ReviewAnswer, SimilarMatch, Statement,
};

use crate::PipelineOutput;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_statements_found: usize,
    /// Statements discarded because their span ran past the document end.
    pub dropped_statements: usize,
    pub processing_timestamp: DateTime<Utc>,
    pub statements: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_name: Option<String>,
    pub exact_match: Option<String>,
    pub similar_matches: Vec<SimilarMatch>,
    pub manual_required: bool,
    pub ask_question: bool,
    pub location: Location,
    /// Canonical-page header, e.g. `"page 3 of 3"`.
    pub paging: String,
    pub number_of_pages: u32,
    /// Dash-joined 1-based source pages, e.g. `"4-5-6"`.
    pub page_range: String,
    pub first_page: u32,
    pub destination: Destination,
    pub extraction_method: ExtractionMethod,
    /// True only when the first-line fallback produced the final name.
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<ReviewAnswer>,
}

impl ReportEntry {
    fn from_statement(statement: &Statement) -> Self {
        Self {
            company_name: statement.company_name.clone(),
            fallback_name: statement.fallback_name.clone(),
            exact_match: statement.exact_match.clone(),
            similar_matches: statement.similar_matches.clone(),
            manual_required: statement.manual_required,
            ask_question: statement.ask_question,
            location: statement.location,
            paging: statement.page_span.paging_label(),
            number_of_pages: statement.page_span.total_pages,
            page_range: statement.page_span.range_label(),
            first_page: statement.page_span.first_page,
            destination: statement.destination,
            extraction_method: statement.extraction_method,
            fallback_used: statement.extraction_method.is_fallback(),
            user_answer: statement.user_answer,
        }
    }
}

/// Build the report for a finished (and possibly reviewed) run.
pub fn build_report(output: &PipelineOutput) -> Report {
    Report {
        total_statements_found: output.statements.len(),
        dropped_statements: output.dropped,
        processing_timestamp: Utc::now(),
        statements: output
            .statements
            .iter()
            .map(ReportEntry::from_statement)
            .collect(),
    }
}
