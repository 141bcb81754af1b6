//! Tokenizer front-end: text → `input_ids` + `attention_mask`.
//!
//! Wraps a HuggingFace `tokenizer.json`. Token-type ids are dropped because
//! the exported model only consumes ids and mask.

use std::path::Path;

use qingxu_core::AnalysisError;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Default maximum sequence length the classifier was fine-tuned with.
pub const DEFAULT_MAX_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Inputs longer than this many tokens (special tokens included) are truncated.
    pub max_length: usize,
    /// Pad every input to `max_length` instead of to its own length.
    pub pad_to_max_length: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            pad_to_max_length: false,
        }
    }
}

/// Model inputs for a batch of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
}

impl EncodedText {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TextEncoder {
    /// Load a `tokenizer.json` and install truncation and padding.
    pub fn from_file(path: &Path, config: &EncoderConfig) -> Result<Self, AnalysisError> {
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            AnalysisError::Startup(format!("load tokenizer {}: {e}", path.display()))
        })?;
        Self::with_tokenizer(tokenizer, config)
    }

    pub fn with_tokenizer(
        mut tokenizer: Tokenizer,
        config: &EncoderConfig,
    ) -> Result<Self, AnalysisError> {
        if config.max_length == 0 {
            return Err(AnalysisError::Startup(
                "max_length must be greater than zero".into(),
            ));
        }

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                ..Default::default()
            }))
            .map_err(|e| AnalysisError::Startup(format!("set truncation: {e}")))?;

        let strategy = if config.pad_to_max_length {
            PaddingStrategy::Fixed(config.max_length)
        } else {
            PaddingStrategy::BatchLongest
        };
        tokenizer.with_padding(Some(PaddingParams {
            strategy,
            ..Default::default()
        }));

        Ok(Self {
            tokenizer,
            max_length: config.max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode one text with special tokens. Never fails on length.
    pub fn encode(&self, text: &str) -> Result<EncodedText, AnalysisError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| AnalysisError::Inference(format!("tokenize: {e}")))?;

        let input_ids = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();

        Ok(EncodedText {
            input_ids,
            attention_mask,
        })
    }
}
