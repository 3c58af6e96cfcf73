use thiserror::Error;

/// Errors raised by the skill extraction and matching pipeline.
/// Any of these aborts the whole call; nothing is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// OCR backend failure or unreadable input file.
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Job offer store unreachable or the query failed.
    #[error("Job offer source failed: {0}")]
    DataSource(String),

    #[error("Invalid pipeline data: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for PipelineError {
    fn from(e: sqlx::Error) -> Self {
        PipelineError::DataSource(e.to_string())
    }
}
