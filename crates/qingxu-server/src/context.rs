//! The immutable inference context shared by every request handler.

use qingxu_ai::EmotionModel;
use qingxu_core::{AnalysisError, EmotionAnalysis};
use tracing::info;

/// Loaded model plus post-processing. Built once at start-up, never mutated.
pub struct InferenceContext {
    model: Box<dyn EmotionModel>,
}

impl InferenceContext {
    pub fn new(model: Box<dyn EmotionModel>) -> Self {
        Self { model }
    }

    /// Classify one text. Blocking; call from the blocking pool inside async code.
    pub fn analyze(&self, text: &str) -> Result<EmotionAnalysis, AnalysisError> {
        let raw = self.model.predict(text)?;
        EmotionAnalysis::from_raw(raw)
    }

    /// Mandatory start-up call that surfaces broken artifacts before serving.
    pub fn warm_up(&self, text: &str) -> Result<EmotionAnalysis, AnalysisError> {
        let analysis = self
            .analyze(text)
            .map_err(|e| AnalysisError::Startup(format!("warm-up call failed: {e}")))?;
        info!(
            sample = text,
            label = analysis.emotion.index(),
            emotion = analysis.emotion.display_name(),
            intensity = %format!("{:.4}", analysis.intensity),
            "warm-up inference succeeded"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BrokenModel, KeywordModel};
    use qingxu_core::Emotion;

    #[test]
    fn analyze_runs_postprocessing() {
        let ctx = InferenceContext::new(Box::new(KeywordModel));
        let analysis = ctx.analyze("我今天很开心").unwrap();
        assert_eq!(analysis.emotion, Emotion::Positive);
        let sum: f64 = analysis.probabilities.values().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn warm_up_failure_is_startup_error() {
        let ctx = InferenceContext::new(Box::new(BrokenModel));
        let err = ctx.warm_up("我今天很开心").unwrap_err();
        assert!(matches!(err, AnalysisError::Startup(ref m) if m.contains("warm-up")));
    }

    #[test]
    fn warm_up_returns_sample_analysis() {
        let ctx = InferenceContext::new(Box::new(KeywordModel));
        let analysis = ctx.warm_up("我今天很开心").unwrap();
        assert_eq!(analysis.emotion, Emotion::Positive);
    }
}
