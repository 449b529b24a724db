//! Company name extraction
//!
//! Statement layouts are inconsistent: some issuers print the company name
//! directly before the total line, others wrap it across a line break, others
//! bury it only in the first line of the block. A strict priority cascade of
//! four strategies handles all observed layouts, falling back to the first
//! cleaned line of the block.

use statement_types::ExtractionMethod;

use crate::patterns::{
    collapse_whitespace, statement_bounds, LINE_COMPANY, MULTILINE_COMPANY, SKIP_LINES,
    START_MARKERS, SUBTOTAL_COMPANY,
};

/// Results above this length from the Total-Due patterns captured invoice
/// line items by accident and are rejected.
const MAX_COMPANY_LEN: usize = 100;

/// Outcome of the extraction cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub company_name: String,
    /// First cleaned line of the statement block.
    pub fallback_name: String,
    pub method: ExtractionMethod,
}

/// Cleaned statement block: the non-boilerplate lines between the start and
/// end markers, plus the body text below the company line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBlock {
    pub lines: Vec<String>,
    pub body: String,
}

/// Clip the canonical page's text to the statement block and clean it.
/// None when the page lacks markers or yields no usable lines.
pub fn statement_block(page_text: &str) -> Option<StatementBlock> {
    let (start, end) = statement_bounds(page_text)?;
    let mut content = page_text[start..end].to_string();
    for marker in START_MARKERS {
        content = content.replace(marker, "");
    }

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !SKIP_LINES.iter().any(|skip| line.contains(skip)))
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return None;
    }
    let body = lines[1..].join("\n");
    Some(StatementBlock { lines, body })
}

/// Apply the 4-tier extraction cascade to the canonical page.
///
/// `page_text` is the full page text (the Total-Due patterns anchor on the
/// invoice totals outside the clipped block); `lines` is the cleaned block
/// from [`statement_block`].
pub fn extract_company_name(page_text: &str, lines: &[String]) -> Extraction {
    let fallback_name = lines
        .first()
        .map(String::as_str)
        .unwrap_or("Unknown")
        .to_string();

    // Tier 1: name bracketed between Subtotal and Total Due
    if let Some(caps) = SUBTOTAL_COMPANY.captures(page_text) {
        return Extraction {
            company_name: clean_candidate(&caps[1]),
            fallback_name,
            method: ExtractionMethod::SubtotalPattern,
        };
    }

    // Tier 2: name wrapped across a line break before Total Due
    if let Some(caps) = MULTILINE_COMPANY.captures(page_text) {
        let company = clean_candidate(&caps[1]);
        if company.chars().count() <= MAX_COMPANY_LEN {
            return Extraction {
                company_name: company,
                fallback_name,
                method: ExtractionMethod::MultilinePattern,
            };
        }
        // Over-length capture means invoice lines leaked in; try the
        // stricter single-line pattern before giving up.
        if let Some(line) = line_pattern_candidate(page_text) {
            return Extraction {
                company_name: line,
                fallback_name,
                method: ExtractionMethod::LinePattern,
            };
        }
        return fallback(fallback_name);
    }

    // Tier 3: name on the same line as Total Due
    if let Some(line) = line_pattern_candidate(page_text) {
        return Extraction {
            company_name: line,
            fallback_name,
            method: ExtractionMethod::LinePattern,
        };
    }

    // Tier 4: first cleaned line of the block
    fallback(fallback_name)
}

fn fallback(fallback_name: String) -> Extraction {
    Extraction {
        company_name: fallback_name.clone(),
        fallback_name,
        method: ExtractionMethod::Fallback,
    }
}

fn line_pattern_candidate(page_text: &str) -> Option<String> {
    let caps = LINE_COMPANY.captures(page_text)?;
    let company = clean_candidate(&caps[1]);
    if company.chars().count() > MAX_COMPANY_LEN {
        return None;
    }
    Some(company)
}

/// Collapse whitespace and drop a leading column-header token.
fn clean_candidate(raw: &str) -> String {
    let company = collapse_whitespace(raw);
    match company.strip_prefix("Amount ") {
        Some(rest) => rest.trim().to_string(),
        None => company,
    }
}
