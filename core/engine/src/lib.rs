pub mod bootstrap;
pub mod config_manager;
pub mod detection_process;
pub mod emotion_adapter;
pub mod error;
pub mod health_check;
pub mod http_api;
pub mod nmt_client;
pub mod prediction_log;
pub mod prediction_service;
pub mod trend_aggregator;
pub mod types;

pub use bootstrap::{EmotionEngine, EmotionEngineBuilder, EngineHealth};
pub use config_manager::ServerConfig;
pub use detection_process::{DetectionSupervisor, StartOutcome, StopOutcome};
pub use emotion_adapter::{
    EmotionAdapter, EmotionRequest, EmotionResponse, FixedEmotionClassifier,
    HttpEmotionClassifier, RuleBasedEmotionClassifier,
};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use nmt_client::{LanguageBridge, NmtClient, NmtTranslateRequest, NmtTranslateResponse};
pub use prediction_log::PredictionLogger;
pub use prediction_service::{Prediction, PredictionService};
pub use trend_aggregator::TrendAggregator;
pub use types::{Emotion, Language, PredictionRecord, TrendRow};
