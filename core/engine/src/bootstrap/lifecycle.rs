//! EmotionEngine 生命周期管理
//!
//! 启动时探测外部服务，关闭时停止检测进程

use tracing::{info, warn};

use crate::error::EngineResult;
use crate::health_check::ServiceHealth;

use super::core::EmotionEngine;

/// 各组件健康状态
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineHealth {
    pub translation: ServiceHealth,
    pub classifier: ServiceHealth,
    pub detection_running: bool,
}

impl EmotionEngine {
    /// 启动前检查：外部服务不可用只记录警告，不阻止启动（请求时会降级为 neutral）
    pub async fn boot(&self) -> EngineResult<()> {
        let health = self.health().await;
        for service in [&health.translation, &health.classifier] {
            if service.is_healthy {
                info!(service = %service.service_name, url = ?service.url, "service ready");
            } else {
                warn!(
                    service = %service.service_name,
                    url = ?service.url,
                    error = ?service.error,
                    "service is not healthy, predictions will fall back to neutral"
                );
            }
        }
        info!(log = %self.log.path().display(), "emotion engine booted");
        Ok(())
    }

    pub async fn health(&self) -> EngineHealth {
        let checker = &self.health_checker;
        let (translation, classifier) = tokio::join!(
            checker.check_optional("translation", self.prediction.bridge().client().endpoint()),
            checker.check_optional("classifier", self.classifier.endpoint()),
        );
        EngineHealth {
            translation,
            classifier,
            detection_running: self.detection.is_running().await,
        }
    }

    /// 关闭引擎：结束仍在运行的检测进程
    pub async fn shutdown(&self) -> EngineResult<()> {
        let outcome = self.detection.stop().await?;
        info!(detection = outcome.as_str(), "emotion engine shut down");
        Ok(())
    }
}
