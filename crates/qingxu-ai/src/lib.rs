//! AI inference layer: tokenizer encoding and the ONNX Runtime emotion model.

mod model;
pub use model::EmotionModel;

#[cfg(feature = "onnx")]
mod encoder;
#[cfg(feature = "onnx")]
pub use encoder::{DEFAULT_MAX_LENGTH, EncodedText, EncoderConfig, TextEncoder};

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::{MODEL_FILE, OnnxEmotionModel, TOKENIZER_FILE};
