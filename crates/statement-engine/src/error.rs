use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to load reference list: {0}")]
    ReferenceLoad(String),
}

/// Errors from the interactive review session. None of these corrupt
/// session state; the caller re-prompts and tries again.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    #[error("No question is pending for statement {0}")]
    NotCurrentQuestion(usize),

    #[error("Unknown statement id: {0}")]
    UnknownStatement(usize),

    #[error("No previous answer to go back to")]
    EmptyHistory,

    #[error("Review session already complete")]
    SessionComplete,
}
