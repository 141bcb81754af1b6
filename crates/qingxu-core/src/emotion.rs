//! Fixed label enumeration for the sentiment classifier.
//!
//! The classification head emits one logit per label, in index order. On the
//! wire a label is its integer index (`0` = negative, `1` = positive); the
//! Chinese display names are only used for logs and CLI output.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Predicted emotion polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emotion {
    Negative = 0,
    Positive = 1,
}

impl Emotion {
    /// All labels in logit order.
    pub const ALL: [Emotion; 2] = [Emotion::Negative, Emotion::Positive];

    /// Number of classes the classification head must produce.
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name (`负面` / `正面`).
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Negative => "负面",
            Emotion::Positive => "正面",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Serialize for Emotion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Emotion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Emotion::from_index(raw as usize)
            .ok_or_else(|| de::Error::custom(format!("unknown emotion label {raw}")))
    }
}
