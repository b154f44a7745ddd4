//! Error types for the extraction engine.

/// Errors that can occur while planning, extracting, or finalizing components.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parse failed for {stage}: {message}")]
    ParseFailed { stage: String, message: String },

    #[error("Format failed: {0}")]
    FormatFailed(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Two different fragments derived the same component name.
    #[error("Duplicate component '{name}': a different fragment was already emitted under this name")]
    DuplicateComponent { name: String },

    /// A step did not reduce the number of qualifying nodes.
    #[error("Extraction stalled at component '{name}': qualifying node count did not shrink")]
    ExtractionStalled { name: String },
}

impl ParserError {
    pub(crate) fn parse_failed(stage: &str, message: impl Into<String>) -> Self {
        Self::ParseFailed {
            stage: stage.to_string(),
            message: message.into(),
        }
    }
}
