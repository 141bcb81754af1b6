use std::path::PathBuf;

use qingxu_ai::EncoderConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_DIR: &str = "./Chinese_sentiment_model";

/// Sample sentence ("I am very happy today") run once before serving.
pub const DEFAULT_WARMUP_TEXT: &str = "我今天很开心";

/// Process-level settings for the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: PathBuf,
    pub encoder: EncoderConfig,
    pub warmup_text: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            encoder: EncoderConfig::default(),
            warmup_text: DEFAULT_WARMUP_TEXT.into(),
        }
    }
}
