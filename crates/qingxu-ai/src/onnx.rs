//! ONNX Runtime backend for the fine-tuned sentiment classifier.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`. The
//! exported graph takes `input_ids` and `attention_mask` (int64, `[1, seq]`)
//! and returns `logits` (`[1, num_labels]`) and `intensity` (`[1]` or `[1, 1]`).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use qingxu_core::{AnalysisError, Emotion, RawPrediction};
use tracing::{debug, info};

use crate::encoder::{EncodedText, EncoderConfig, TextEncoder};
use crate::model::EmotionModel;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

const LOGITS_OUTPUT: &str = "logits";
const INTENSITY_OUTPUT: &str = "intensity";

/// Sentiment classifier + intensity regressor running on ONNX Runtime.
pub struct OnnxEmotionModel {
    // `Session::run` needs exclusive access; weights themselves are never written.
    session: Mutex<Session>,
    encoder: TextEncoder,
}

impl OnnxEmotionModel {
    /// Load the checkpoint directory. Every failure here is a start-up failure.
    pub fn load(model_dir: &Path, config: &EncoderConfig) -> Result<Self, AnalysisError> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            return Err(AnalysisError::Startup(format!(
                "{MODEL_FILE} not found in {model_dir:?}"
            )));
        }
        if !tokenizer_path.exists() {
            return Err(AnalysisError::Startup(format!(
                "{TOKENIZER_FILE} not found in {model_dir:?}"
            )));
        }

        let session = open_session(&model_path)
            .map_err(|e| AnalysisError::Startup(format!("load {}: {e:#}", model_path.display())))?;
        let encoder = TextEncoder::from_file(&tokenizer_path, config)?;

        info!(
            model = %model_path.display(),
            max_length = encoder.max_length(),
            labels = Emotion::COUNT,
            "loaded emotion model"
        );
        Ok(Self {
            session: Mutex::new(session),
            encoder,
        })
    }

    fn forward(&self, encoded: EncodedText) -> anyhow::Result<RawPrediction> {
        let shape = [1i64, encoded.len() as i64];
        let ids_tensor = Tensor::from_array((shape, encoded.input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, encoded.attention_mask.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
        ])?;

        let (logits_shape, logits) = outputs[LOGITS_OUTPUT].try_extract_tensor::<f32>()?;
        let dims: &[i64] = logits_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] == 1,
            "unexpected logits shape: {dims:?}, expected [1, {}]",
            Emotion::COUNT
        );

        let (_, intensity) = outputs[INTENSITY_OUTPUT].try_extract_tensor::<f32>()?;
        let intensity = *intensity
            .first()
            .ok_or_else(|| anyhow::anyhow!("empty intensity output"))?;

        Ok(RawPrediction {
            logits: logits.to_vec(),
            intensity,
        })
    }
}

impl EmotionModel for OnnxEmotionModel {
    fn predict(&self, text: &str) -> Result<RawPrediction, AnalysisError> {
        let encoded = self.encoder.encode(text)?;
        debug!(tokens = encoded.len(), "encoded input");
        self.forward(encoded)
            .map_err(|e| AnalysisError::Inference(format!("{e:#}")))
    }
}

/// Build a session and check the graph exposes the outputs we read.
fn open_session(model_path: &Path) -> anyhow::Result<Session> {
    let session = Session::builder()?.commit_from_file(model_path)?;

    for required in [LOGITS_OUTPUT, INTENSITY_OUTPUT] {
        anyhow::ensure!(
            session.outputs().iter().any(|o| o.name() == required),
            "model has no '{required}' output"
        );
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn checkpoint_dir() -> PathBuf {
        std::env::var_os("QINGXU_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                    .join("..")
                    .join("..")
                    .join("models")
                    .join("Chinese_sentiment_model")
            })
    }

    /// The exported checkpoint is not checked in; tests that need it are
    /// skipped when it is absent.
    fn require_checkpoint() -> Option<PathBuf> {
        let dir = checkpoint_dir();
        if dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists() {
            Some(dir)
        } else {
            eprintln!("skipping: no checkpoint in {}", dir.display());
            None
        }
    }

    #[test]
    fn missing_model_file_is_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxEmotionModel::load(dir.path(), &EncoderConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, AnalysisError::Startup(ref m) if m.contains(MODEL_FILE)));
    }

    #[test]
    fn missing_tokenizer_file_is_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), b"not a model").unwrap();
        let err = OnnxEmotionModel::load(dir.path(), &EncoderConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, AnalysisError::Startup(ref m) if m.contains(TOKENIZER_FILE)));
    }

    #[test]
    fn corrupt_model_is_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), b"not a model").unwrap();
        std::fs::copy(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/tokenizer.json"),
            dir.path().join(TOKENIZER_FILE),
        )
        .unwrap();
        let err = OnnxEmotionModel::load(dir.path(), &EncoderConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, AnalysisError::Startup(_)));
    }

    #[test]
    fn happy_sentence_is_positive() {
        let Some(dir) = require_checkpoint() else {
            return;
        };
        let model = OnnxEmotionModel::load(&dir, &EncoderConfig::default()).unwrap();
        let raw = model.predict("我今天很开心").unwrap();
        let analysis = qingxu_core::EmotionAnalysis::from_raw(raw).unwrap();
        assert_eq!(analysis.emotion, Emotion::Positive);
    }

    #[test]
    fn prediction_is_deterministic() {
        let Some(dir) = require_checkpoint() else {
            return;
        };
        let model = OnnxEmotionModel::load(&dir, &EncoderConfig::default()).unwrap();
        let a = model.predict("今天的天气让我很难过").unwrap();
        let b = model.predict("今天的天气让我很难过").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.logits.len(), Emotion::COUNT);
    }

    #[test]
    fn overlong_input_is_truncated() {
        let Some(dir) = require_checkpoint() else {
            return;
        };
        let model = OnnxEmotionModel::load(&dir, &EncoderConfig::default()).unwrap();
        let raw = model.predict(&"开心".repeat(2000)).unwrap();
        assert_eq!(raw.logits.len(), Emotion::COUNT);
    }
}
