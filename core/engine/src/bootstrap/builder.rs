use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config_manager::{ClassifierKind, DetectionConfig, ServerConfig, TranslationKind};
use crate::detection_process::DetectionSupervisor;
use crate::emotion_adapter::{
    EmotionAdapter, FixedEmotionClassifier, HttpEmotionClassifier, RuleBasedEmotionClassifier,
};
use crate::error::{EngineError, EngineResult};
use crate::health_check::HealthChecker;
use crate::nmt_client::{LanguageBridge, NmtClient, PassthroughNmtClient, RemoteNmtHttpClient};
use crate::prediction_log::PredictionLogger;
use crate::prediction_service::PredictionService;
use crate::trend_aggregator::TrendAggregator;

use super::core::EmotionEngine;

const DEFAULT_TIMEOUT_MS: u64 = 5000;

pub struct EmotionEngineBuilder {
    classifier: Option<Arc<dyn EmotionAdapter>>,
    nmt: Option<Arc<dyn NmtClient>>,
    log_path: Option<PathBuf>,
    detection: Option<DetectionConfig>,
    translate_timeout: Duration,
    classify_timeout: Duration,
}

impl EmotionEngineBuilder {
    pub fn new() -> Self {
        Self {
            classifier: None,
            nmt: None,
            log_path: None,
            detection: None,
            translate_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            classify_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// 按配置文件装配全部组件
    pub fn from_config(config: &ServerConfig) -> EngineResult<Self> {
        let classifier: Arc<dyn EmotionAdapter> = match config.classifier.kind {
            ClassifierKind::RuleBased => Arc::new(RuleBasedEmotionClassifier::new()),
            ClassifierKind::Fixed => {
                Arc::new(FixedEmotionClassifier::new(config.classifier.fixed_label))
            }
            ClassifierKind::Http => Arc::new(HttpEmotionClassifier::new(
                config.classifier.url.clone(),
                Duration::from_millis(config.classifier.timeout_ms),
            )?),
        };

        let nmt: Arc<dyn NmtClient> = match config.translation.kind {
            TranslationKind::Passthrough => Arc::new(PassthroughNmtClient),
            TranslationKind::Http => Arc::new(
                RemoteNmtHttpClient::new(
                    config.translation.url.clone(),
                    config.translation.api_key.clone(),
                    Duration::from_millis(config.translation.timeout_ms),
                )
                .map_err(|e| EngineError::config(format!("Failed to create translation client: {e}")))?,
            ),
        };

        Ok(Self::new()
            .classifier(classifier)
            .nmt(nmt)
            .log_path(config.log.path.clone())
            .detection(config.detection.clone())
            .translate_timeout(Duration::from_millis(config.translation.timeout_ms))
            .classify_timeout(Duration::from_millis(config.classifier.timeout_ms)))
    }

    pub fn classifier(mut self, classifier: Arc<dyn EmotionAdapter>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn nmt(mut self, nmt: Arc<dyn NmtClient>) -> Self {
        self.nmt = Some(nmt);
        self
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn detection(mut self, detection: DetectionConfig) -> Self {
        self.detection = Some(detection);
        self
    }

    pub fn translate_timeout(mut self, timeout: Duration) -> Self {
        self.translate_timeout = timeout;
        self
    }

    pub fn classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    pub fn build(self) -> EngineResult<EmotionEngine> {
        let classifier = self
            .classifier
            .ok_or_else(|| EngineError::config("classifier is missing"))?;
        let nmt = self.nmt.ok_or_else(|| EngineError::config("nmt is missing"))?;
        let log_path = self
            .log_path
            .ok_or_else(|| EngineError::config("log_path is missing"))?;

        let log = Arc::new(PredictionLogger::new(log_path));
        let prediction = PredictionService::new(
            LanguageBridge::new(nmt, self.translate_timeout),
            Arc::clone(&classifier),
            Arc::clone(&log),
            self.classify_timeout,
        );

        Ok(EmotionEngine {
            prediction,
            trends: TrendAggregator::new(Arc::clone(&log)),
            detection: DetectionSupervisor::new(self.detection.unwrap_or_default()),
            classifier,
            log,
            health_checker: HealthChecker::new(),
        })
    }
}

impl Default for EmotionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
