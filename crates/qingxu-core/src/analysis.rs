//! Post-processing of raw model outputs into the public response shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;
use crate::error::AnalysisError;

/// Unnormalized outputs of one forward pass over a batch of one.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    /// One logit per label, in [`Emotion::ALL`] order.
    pub logits: Vec<f32>,
    /// Regression head output, unclamped.
    pub intensity: f32,
}

/// Response body of `POST /emotion/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub emotion: Emotion,
    pub intensity: f64,
    pub probabilities: BTreeMap<Emotion, f64>,
}

impl EmotionAnalysis {
    pub fn from_raw(raw: RawPrediction) -> Result<Self, AnalysisError> {
        if raw.logits.len() != Emotion::COUNT {
            return Err(AnalysisError::Inference(format!(
                "expected {} logits, got {}",
                Emotion::COUNT,
                raw.logits.len()
            )));
        }
        if raw.logits.iter().any(|l| !l.is_finite()) {
            return Err(AnalysisError::Inference(format!(
                "non-finite logits: {:?}",
                raw.logits
            )));
        }

        let probs = softmax(&raw.logits);

        // First index wins ties, matching torch.argmax.
        let mut best = 0;
        for (i, &p) in probs.iter().enumerate().skip(1) {
            if p > probs[best] {
                best = i;
            }
        }
        let emotion = Emotion::from_index(best)
            .ok_or_else(|| AnalysisError::Inference(format!("no label for class {best}")))?;

        let probabilities = Emotion::ALL.iter().copied().zip(probs).collect();

        tracing::debug!(
            emotion = emotion.index(),
            intensity = raw.intensity,
            "post-processed prediction"
        );

        Ok(Self {
            emotion,
            intensity: f64::from(raw.intensity),
            probabilities,
        })
    }

    /// Probability assigned to the predicted label.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(&self.emotion).copied().unwrap_or(0.0)
    }
}

/// Numerically stable softmax, computed in f64.
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    if logits.is_empty() {
        return vec![];
    }
    let max = logits
        .iter()
        .map(|&l| f64::from(l))
        .fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (f64::from(l) - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
