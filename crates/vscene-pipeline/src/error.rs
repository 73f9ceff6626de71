//! Pipeline error types.

use thiserror::Error;
use vscene_media::MediaError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures reported before any processing begins.
    pub fn is_precondition(&self) -> bool {
        match self {
            PipelineError::Config(_) => true,
            PipelineError::Media(e) => e.is_precondition(),
            PipelineError::Io(_) => false,
        }
    }
}
