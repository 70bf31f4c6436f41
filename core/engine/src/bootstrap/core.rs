use std::sync::Arc;

use crate::detection_process::DetectionSupervisor;
use crate::emotion_adapter::EmotionAdapter;
use crate::health_check::HealthChecker;
use crate::prediction_log::PredictionLogger;
use crate::prediction_service::PredictionService;
use crate::trend_aggregator::TrendAggregator;

pub struct EmotionEngine {
    pub(crate) prediction: PredictionService,
    pub(crate) trends: TrendAggregator,
    pub(crate) detection: DetectionSupervisor,
    // 以下仅用于健康检查
    pub(crate) classifier: Arc<dyn EmotionAdapter>,
    pub(crate) log: Arc<PredictionLogger>,
    /// 复用同一个 HTTP 客户端，避免每次 /health 都新建连接池
    pub(crate) health_checker: HealthChecker,
}

impl EmotionEngine {
    pub fn prediction(&self) -> &PredictionService {
        &self.prediction
    }

    pub fn trends(&self) -> &TrendAggregator {
        &self.trends
    }

    pub fn detection(&self) -> &DetectionSupervisor {
        &self.detection
    }

    pub fn log(&self) -> &PredictionLogger {
        &self.log
    }
}
