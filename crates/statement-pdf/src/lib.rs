//! PDF handling for the statement router
//!
//! Page-text extraction feeding the classification engine, and per-bucket
//! document splitting once statements are classified.

pub mod error;
pub mod split;
pub mod text;

pub use error::StatementPdfError;
pub use split::{split_by_destination, BucketOutput};
pub use text::extract_page_texts;
