use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Missing or malformed request body. Surfaced as a client error.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Tokenization or forward-pass failure. Surfaced as a server error.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Model artifacts could not be loaded, or the warm-up call failed.
    #[error("startup failed: {0}")]
    Startup(String),
}

impl AnalysisError {
    /// Stable machine-readable kind, used as the `error` field of JSON bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest(_) => "invalid_request",
            AnalysisError::Inference(_) => "internal_inference_error",
            AnalysisError::Startup(_) => "startup_failure",
        }
    }

    /// True when the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_classes() {
        let invalid = AnalysisError::InvalidRequest("missing text".into());
        assert_eq!(invalid.kind(), "invalid_request");
        assert!(invalid.is_client_error());

        let inference = AnalysisError::Inference("oom".into());
        assert_eq!(inference.kind(), "internal_inference_error");
        assert!(!inference.is_client_error());
        assert_eq!(inference.to_string(), "inference failed: oom");
    }
}
