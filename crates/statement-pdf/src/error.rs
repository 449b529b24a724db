use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementPdfError {
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF operation failed: {0}")]
    Operation(String),
}
