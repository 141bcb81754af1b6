//! Deterministic in-process models for handler tests.

use qingxu_ai::EmotionModel;
use qingxu_core::{AnalysisError, RawPrediction};

const POSITIVE: &[&str] = &["开心", "高兴", "快乐", "喜欢", "好"];
const NEGATIVE: &[&str] = &["难过", "伤心", "生气", "讨厌", "不"];

/// Scores text by counting sentiment keywords.
pub struct KeywordModel;

impl EmotionModel for KeywordModel {
    fn predict(&self, text: &str) -> Result<RawPrediction, AnalysisError> {
        let pos = POSITIVE.iter().map(|w| text.matches(w).count()).sum::<usize>() as f32;
        let neg = NEGATIVE.iter().map(|w| text.matches(w).count()).sum::<usize>() as f32;
        let len = text.chars().count() as f32;
        Ok(RawPrediction {
            logits: vec![neg - pos + 0.01 * len, pos - neg],
            intensity: (pos + neg) / (1.0 + pos + neg),
        })
    }
}

/// Fails every forward pass.
pub struct BrokenModel;

impl EmotionModel for BrokenModel {
    fn predict(&self, _text: &str) -> Result<RawPrediction, AnalysisError> {
        Err(AnalysisError::Inference("out of memory".into()))
    }
}
