use qingxu_core::{AnalysisError, RawPrediction};

/// A loaded, read-only sentiment model.
///
/// Implementations are shared across request handlers, so `predict` takes
/// `&self` and must not mutate observable state.
pub trait EmotionModel: Send + Sync {
    /// Run one forward pass over a single text.
    fn predict(&self, text: &str) -> Result<RawPrediction, AnalysisError>;
}
