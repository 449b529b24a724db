//! Regex patterns and token tables for statement parsing
//!
//! One compiled pattern set shared by the scanner, extractor, and matcher.
//! The marker strings and skip-line boilerplate come from the statement
//! layout emitted by the issuer's billing system.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `Page X of Y` header found on every statement page.
    pub static ref PAGE_HEADER: Regex =
        Regex::new(r"(?i)Page\s*(\d+)\s*of\s*(\d+)").unwrap();

    /// Company name bracketed between the subtotal and total lines.
    pub static ref SUBTOTAL_COMPANY: Regex = Regex::new(
        r"(?i)Subtotal\s+\$[\d,]+\.\d{2}\s+([^\n\r]+?)\s+Total Due\s+\$[\d,]+\.\d{2}"
    )
    .unwrap();

    /// Company name wrapped across a line break before the total line.
    pub static ref MULTILINE_COMPANY: Regex =
        Regex::new(r"(?i)([^\n\r]+\n[^\n\r]*?)\s+Total Due\s+\$[\d,]+\.\d{2}").unwrap();

    /// Company name on the same line as the total, no line break crossed.
    pub static ref LINE_COMPANY: Regex =
        Regex::new(r"(?i)(\S[^\n\r]*?)\s+Total Due\s+\$[\d,]+\.\d{2}").unwrap();

    /// Business-entity suffixes stripped during normalization, whole words only.
    pub static ref BUSINESS_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:inc|incorporated|corp|corporation|llc|ltd|limited|llp|lp|pc|pa|pllc|plc|co|company|companies|enterprise|enterprises|group|groups|holding|holdings|international|intl|global|solutions|services|systems|technologies|tech|industries|foundation|trust|association|society|institute|center|centre|organization|org)\b"
    )
    .unwrap();

    /// Punctuation, whitespace, and separator runs collapsed during normalization.
    pub static ref SEPARATORS: Regex = Regex::new(r"[\s,.()\-_&]+").unwrap();

    /// Whitespace runs collapsed in extracted names.
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strings whose presence marks the top of a statement block.
pub const START_MARKERS: &[&str] = &[
    "914.949.9618",
    "302.703.8961",
    "www.unitedcorporate.com",
    "AR@UNITEDCORPORATE.COM",
];

/// String marking the end of the statement header region.
pub const END_MARKER: &str = "STATEMENT OF OPEN INVOICE(S)";

/// Boilerplate lines removed from the statement block before extraction.
pub const SKIP_LINES: &[&str] = &[
    "Statement Date:",
    "Total Due:",
    "www.unitedcorporate.com",
    "Amount",
    "Invoice Number",
    "Description",
    "Invoice Date",
    "Invoice Number Description Invoice Date Amount",
];

/// Two-letter US state and territory codes used for location detection.
pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Normalize a company name for reference-list comparison: lowercase, strip
/// business-entity suffixes as whole words, then drop punctuation, whitespace,
/// and separators entirely.
pub fn normalize_company_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = BUSINESS_SUFFIX.replace_all(lowered.trim(), "");
    SEPARATORS.replace_all(&stripped, "").trim().to_string()
}

/// Collapse internal whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").trim().to_string()
}

/// Byte offset of the earliest start marker present in `text`, if any.
pub fn find_start_marker(text: &str) -> Option<usize> {
    START_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min()
}

/// Clip of `text` between the earliest start marker and the end marker.
/// None when either marker is missing or they are out of order.
pub fn statement_bounds(text: &str) -> Option<(usize, usize)> {
    let start = find_start_marker(text)?;
    let end = text.find(END_MARKER)?;
    if start >= end {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_header_captures_counts() {
        let caps = PAGE_HEADER.captures("Page 2 of 5").unwrap();
        assert_eq!(&caps[1], "2");
        assert_eq!(&caps[2], "5");
    }

    #[test]
    fn test_normalize_strips_suffix_and_punctuation() {
        assert_eq!(normalize_company_name("ACME, INC."), "acme");
        assert_eq!(normalize_company_name("Acme Inc"), "acme");
    }

    #[test]
    fn test_normalize_strips_multiple_suffixes() {
        assert_eq!(normalize_company_name("Riverside Holdings Ltd"), "riverside");
    }

    #[test]
    fn test_normalize_keeps_suffix_inside_word() {
        // "inc" embedded in a longer word is not a suffix
        assert_eq!(normalize_company_name("Vincent Bakery"), "vincentbakery");
    }

    #[test]
    fn test_statement_bounds_requires_both_markers() {
        let text = "www.unitedcorporate.com\nAcme\nSTATEMENT OF OPEN INVOICE(S)";
        assert!(statement_bounds(text).is_some());
        assert!(statement_bounds("no markers here").is_none());
        assert!(statement_bounds("STATEMENT OF OPEN INVOICE(S) then www.unitedcorporate.com").is_none());
    }

    #[test]
    fn test_find_start_marker_picks_earliest() {
        let text = "AR@UNITEDCORPORATE.COM then www.unitedcorporate.com";
        assert_eq!(find_start_marker(text), Some(0));
    }
}
