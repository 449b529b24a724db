use serde::{Serialize, Serializer};

/// Output bucket a statement is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Destination {
    #[serde(rename = "DNM")]
    Dnm,
    Foreign,
    NationalSingle,
    NationalMulti,
}

impl Destination {
    /// All buckets, in output order.
    pub const ALL: [Destination; 4] = [
        Destination::Dnm,
        Destination::Foreign,
        Destination::NationalSingle,
        Destination::NationalMulti,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Destination::Dnm => "DNM",
            Destination::Foreign => "Foreign",
            Destination::NationalSingle => "NationalSingle",
            Destination::NationalMulti => "NationalMulti",
        }
    }

    /// File name for this bucket's output document.
    pub fn output_filename(&self) -> &'static str {
        match self {
            Destination::Dnm => "DNM.pdf",
            Destination::Foreign => "Foreign.pdf",
            Destination::NationalSingle => "NationalSingle.pdf",
            Destination::NationalMulti => "NationalMulti.pdf",
        }
    }
}

/// Whether the statement body references a US location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Location {
    National,
    Foreign,
}

/// Which extraction strategy produced the company name, for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    SubtotalPattern,
    MultilinePattern,
    LinePattern,
    Fallback,
}

impl ExtractionMethod {
    /// True when the first-line fallback (tier 4) produced the name.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExtractionMethod::Fallback)
    }
}

/// Answer given during manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAnswer {
    Yes,
    No,
    Skip,
}

impl ReviewAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAnswer::Yes => "yes",
            ReviewAnswer::No => "no",
            ReviewAnswer::Skip => "skip",
        }
    }
}

/// One fuzzy-match candidate from the reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMatch {
    pub company_name: String,
    /// Similarity ratio, 0–100.
    pub score: f64,
}

impl SimilarMatch {
    /// Score rendered the way the report expects it, e.g. `"72.0%"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", (self.score * 10.0).round() / 10.0)
    }
}

impl Serialize for SimilarMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("SimilarMatch", 2)?;
        s.serialize_field("company_name", &self.company_name)?;
        s.serialize_field("percentage", &self.percentage_label())?;
        s.end()
    }
}

/// Contiguous range of physical pages belonging to one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageSpan {
    /// 1-based first page in the source document.
    pub first_page: u32,
    pub total_pages: u32,
}

impl PageSpan {
    pub fn new(first_page: u32, total_pages: u32) -> Self {
        Self {
            first_page,
            total_pages,
        }
    }

    /// 1-based last page; the canonical page for extraction.
    pub fn last_page(&self) -> u32 {
        self.first_page + self.total_pages - 1
    }

    /// All 1-based page numbers in the span, in order.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.first_page..=self.last_page()
    }

    /// Dash-joined page range, e.g. `"4-5-6"`.
    pub fn range_label(&self) -> String {
        self.pages()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Page header of the canonical page, e.g. `"page 3 of 3"`.
    pub fn paging_label(&self) -> String {
        format!("page {} of {}", self.total_pages, self.total_pages)
    }
}

/// One classified statement from the source document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Statement {
    pub company_name: String,
    /// First raw line of the statement block, kept only when a higher-tier
    /// extraction produced a different name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_name: Option<String>,
    pub extraction_method: ExtractionMethod,
    pub exact_match: Option<String>,
    pub similar_matches: Vec<SimilarMatch>,
    pub location: Location,
    pub page_span: PageSpan,
    pub manual_required: bool,
    pub ask_question: bool,
    pub destination: Destination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<ReviewAnswer>,
}

impl Statement {
    /// Best fuzzy score, or 0 when no candidates matched.
    pub fn best_score(&self) -> f64 {
        self.similar_matches.first().map(|m| m.score).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_span_single_page() {
        let span = PageSpan::new(7, 1);
        assert_eq!(span.last_page(), 7);
        assert_eq!(span.range_label(), "7");
        assert_eq!(span.paging_label(), "page 1 of 1");
    }

    #[test]
    fn test_page_span_multi_page() {
        let span = PageSpan::new(4, 3);
        assert_eq!(span.last_page(), 6);
        assert_eq!(span.range_label(), "4-5-6");
        assert_eq!(span.pages().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_similar_match_percentage_label() {
        let m = SimilarMatch {
            company_name: "Acme Inc".into(),
            score: 72.04,
        };
        assert_eq!(m.percentage_label(), "72.0%");
    }

    #[test]
    fn test_similar_match_serializes_percentage_string() {
        let m = SimilarMatch {
            company_name: "Acme Inc".into(),
            score: 66.666,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["percentage"], "66.7%");
        assert_eq!(json["company_name"], "Acme Inc");
    }

    #[test]
    fn test_destination_serializes_dnm_label() {
        let json = serde_json::to_value(Destination::Dnm).unwrap();
        assert_eq!(json, "DNM");
    }
}
