//! Shared data model for the statement routing workspace
//!
//! Plain data types passed between the classification engine, the PDF
//! splitter, and the CLI. No behavior beyond labels and span arithmetic.

pub mod types;

pub use types::{
    Destination, ExtractionMethod, Location, PageSpan, ReviewAnswer, SimilarMatch, Statement,
};
