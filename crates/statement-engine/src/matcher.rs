//! DNM matching
//!
//! Resolves an extracted company name against the reference list: exact
//! string match, then normalized exact match, then an exhaustive fuzzy scan.

use statement_types::SimilarMatch;

use crate::patterns::normalize_company_name;
use crate::reference::ReferenceList;

/// Candidates scoring below this similarity are not worth surfacing.
pub const SIMILARITY_FLOOR: f64 = 60.0;

/// Match result: either one canonical exact match, or the ranked fuzzy
/// candidates (possibly empty). Never both.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub exact_match: Option<String>,
    pub similar_matches: Vec<SimilarMatch>,
}

/// Resolve `company_name` against the reference list.
///
/// The fuzzy stage scans every normalized reference entry rather than
/// stopping at the first hit above the floor: a low-scoring early hit must
/// not suppress a better later one, and manual review needs the full ranked
/// list.
pub fn match_company(reference: &ReferenceList, company_name: &str) -> MatchResult {
    if reference.contains_exact(company_name) {
        return MatchResult {
            exact_match: Some(company_name.to_string()),
            similar_matches: Vec::new(),
        };
    }

    let normalized = normalize_company_name(company_name);
    if let Some(canonical) = reference.lookup_normalized(&normalized) {
        return MatchResult {
            exact_match: Some(canonical.to_string()),
            similar_matches: Vec::new(),
        };
    }

    let mut similar_matches = Vec::new();
    if !normalized.is_empty() {
        for (key, canonical) in reference.normalized_entries() {
            let score = similarity(&normalized, key);
            if score >= SIMILARITY_FLOOR {
                similar_matches.push(SimilarMatch {
                    company_name: canonical.to_string(),
                    score,
                });
            }
        }
        similar_matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    MatchResult {
        exact_match: None,
        similar_matches,
    }
}

/// Character-level similarity ratio between two normalized names, 0–100.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference(names: &[&str]) -> ReferenceList {
        ReferenceList::from_names(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let result = match_company(&reference(&["Acme Inc", "Beta LLC"]), "Acme Inc");
        assert_eq!(result.exact_match.as_deref(), Some("Acme Inc"));
        assert!(result.similar_matches.is_empty());
    }

    #[test]
    fn test_normalized_match_resolves_to_canonical() {
        let result = match_company(&reference(&["Acme Inc"]), "ACME, INC.");
        assert_eq!(result.exact_match.as_deref(), Some("Acme Inc"));
        assert!(result.similar_matches.is_empty());
    }

    #[test]
    fn test_fuzzy_candidates_sorted_descending() {
        let list = reference(&["Johnson Brothers Inc", "Johnson Bro Inc", "Unrelated Foods"]);
        let result = match_company(&list, "Johnson Brother Inc");
        assert!(result.exact_match.is_none());
        assert!(result.similar_matches.len() >= 2);
        for pair in result.similar_matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_fuzzy_scan_is_exhaustive() {
        // Every reference entry above the floor must appear, no truncation
        let list = reference(&["Maplewood Supply", "Maplewood Suppl", "Maplewood Supp"]);
        let result = match_company(&list, "Maplewood Supplies");
        let above_floor = list
            .normalized_entries()
            .filter(|(key, _)| similarity(&normalize_company_name("Maplewood Supplies"), key) >= SIMILARITY_FLOOR)
            .count();
        assert_eq!(result.similar_matches.len(), above_floor);
    }

    #[test]
    fn test_no_candidates_below_floor() {
        let result = match_company(&reference(&["Zebra Imports"]), "Quantum Widgets");
        assert!(result.exact_match.is_none());
        assert!(result.similar_matches.is_empty());
    }
}
