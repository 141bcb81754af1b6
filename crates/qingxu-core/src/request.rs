//! Request body validation for the analyze endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;

/// A single text to analyze. Empty text is allowed; overlong text is
/// truncated by the encoder, never rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Validate an arbitrary JSON body.
    ///
    /// The body must be an object carrying a string `text` field. Unknown
    /// fields are ignored.
    pub fn from_json(body: &Value) -> Result<Self, AnalysisError> {
        let object = body.as_object().ok_or_else(|| {
            AnalysisError::InvalidRequest("request body must be a JSON object".into())
        })?;

        match object.get("text") {
            Some(Value::String(text)) => Ok(Self::new(text.clone())),
            Some(other) => Err(AnalysisError::InvalidRequest(format!(
                "field 'text' must be a string, got {}",
                json_type_name(other)
            ))),
            None => Err(AnalysisError::InvalidRequest(
                "missing required field 'text'".into(),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
