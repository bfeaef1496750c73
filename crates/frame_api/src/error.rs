use spell_generation::GenerationError;
use thiserror::Error;

/// Every failure the frame flow can hit. None of them reach the frame client:
/// decode and validation failures re-render, the rest restart the wizard.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("undecodable state: {0}")]
    Decode(String),
    #[error("input rejected: {0}")]
    Validation(String),
    #[error("generation failed: {0}")]
    Upstream(String),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<GenerationError> for FrameError {
    fn from(value: GenerationError) -> Self {
        Self::Upstream(value.to_string())
    }
}

pub(crate) fn validation(message: impl Into<String>) -> FrameError {
    FrameError::Validation(message.into())
}
