//! Destination classification
//!
//! Combines match confidence, an "email" mention in the statement body, and
//! detected location into one of the four destination buckets, and derives
//! the manual-review flags.

use statement_types::{Destination, Location};

use crate::matcher::MatchResult;

/// Fuzzy scores at or above this are trusted without confirmation.
pub const AUTO_DNM_THRESHOLD: f64 = 90.0;

/// Classification outcome for one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub destination: Destination,
    pub manual_required: bool,
    pub ask_question: bool,
}

/// Detect whether the statement body references a US location: any
/// two-letter state code as a whole space-delimited token. No state token
/// means the address is foreign.
pub fn detect_location(body: &str) -> Location {
    let padded = format!(" {} ", body.to_uppercase());
    let national = crate::patterns::US_STATES
        .iter()
        .any(|state| padded.contains(&format!(" {state} ")));
    if national {
        Location::National
    } else {
        Location::Foreign
    }
}

/// Assign a destination and review flags.
///
/// Auto-DNM fires on an exact match, an "email" mention in the body, or a
/// top fuzzy score at or above the threshold. Manual review applies only
/// when fuzzy candidates exist and nothing auto-resolved; a question is
/// asked only when the top score is genuinely ambiguous (below threshold).
pub fn classify(matches: &MatchResult, body: &str, location: Location, total_pages: u32) -> Classification {
    let has_email = body.to_lowercase().contains("email");
    let best_score = matches
        .similar_matches
        .first()
        .map(|m| m.score)
        .unwrap_or(0.0);
    let auto_dnm =
        matches.exact_match.is_some() || has_email || best_score >= AUTO_DNM_THRESHOLD;

    let destination = if auto_dnm {
        Destination::Dnm
    } else if location == Location::Foreign {
        Destination::Foreign
    } else if total_pages == 1 {
        Destination::NationalSingle
    } else {
        Destination::NationalMulti
    };

    let manual_required = !auto_dnm && !matches.similar_matches.is_empty();
    let ask_question = manual_required && best_score < AUTO_DNM_THRESHOLD;

    Classification {
        destination,
        manual_required,
        ask_question,
    }
}
