pub mod analysis;
pub mod emotion;
pub mod error;
pub mod health;
pub mod request;

pub use analysis::{EmotionAnalysis, RawPrediction, softmax};
pub use emotion::Emotion;
pub use error::AnalysisError;
pub use health::HealthStatus;
pub use request::AnalyzeRequest;
