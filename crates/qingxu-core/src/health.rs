use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub labels: Vec<Emotion>,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
            labels: Emotion::ALL.to_vec(),
        }
    }
}
