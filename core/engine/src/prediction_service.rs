//! 文本情绪预测
//!
//! 单次请求的流程：翻译（非英文时）→ 分类 → 写日志 → 按请求语言本地化标签。
//! 前三步任何一步失败都不会向调用方报错，而是降级为 neutral，失败原因保留在 `Prediction::fallback`。

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::emotion_adapter::EmotionAdapter;
use crate::error::{EngineError, EngineResult};
use crate::nmt_client::LanguageBridge;
use crate::prediction_log::PredictionLogger;
use crate::types::{Emotion, Language, PredictionRecord};

/// 预测结果
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// 展示用标签（按请求语言本地化）
    pub emotion: String,
    /// 模型给出的英文标签
    pub native: Emotion,
    pub language: Language,
    /// 降级原因；为 None 表示流程完整执行
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl Prediction {
    fn resolved(native: Emotion, language: Language) -> Self {
        Self {
            emotion: native.localized(language).to_string(),
            native,
            language,
            fallback: None,
        }
    }

    fn fallback(language: Language, cause: &EngineError) -> Self {
        Self {
            fallback: Some(cause.to_string()),
            ..Self::resolved(Emotion::Neutral, language)
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// 去掉首尾空白；空文本是客户端错误
pub fn validate_text(text: &str) -> EngineResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation("Text is required"));
    }
    Ok(trimmed)
}

pub struct PredictionService {
    bridge: LanguageBridge,
    classifier: Arc<dyn EmotionAdapter>,
    logger: Arc<PredictionLogger>,
    classify_timeout: Duration,
}

impl PredictionService {
    pub fn new(
        bridge: LanguageBridge,
        classifier: Arc<dyn EmotionAdapter>,
        logger: Arc<PredictionLogger>,
        classify_timeout: Duration,
    ) -> Self {
        Self {
            bridge,
            classifier,
            logger,
            classify_timeout,
        }
    }

    pub fn bridge(&self) -> &LanguageBridge {
        &self.bridge
    }

    /// 预测文本情绪
    ///
    /// 只有输入校验会返回错误；上游失败一律降级为 neutral。
    pub async fn predict(&self, text: &str, language: Language) -> EngineResult<Prediction> {
        let text = validate_text(text)?;

        match self.run(text, language).await {
            Ok(native) => {
                info!(language = %language, emotion = %native, "prediction completed");
                Ok(Prediction::resolved(native, language))
            }
            Err(e) => {
                warn!(language = %language, error = %e, "prediction failed, falling back to neutral");
                Ok(Prediction::fallback(language, &e))
            }
        }
    }

    async fn run(&self, text: &str, language: Language) -> EngineResult<Emotion> {
        let native_text = if language.is_native() {
            text.to_string()
        } else {
            self.bridge.translate(text, language, Language::NATIVE).await?
        };

        let native = tokio::time::timeout(self.classify_timeout, self.classifier.classify(&native_text))
            .await
            .map_err(|_| {
                EngineError::upstream(format!(
                    "Classification timed out after {} ms",
                    self.classify_timeout.as_millis()
                ))
            })??;

        // 日志记录原文和请求语言，标签保持英文
        self.logger
            .append(&PredictionRecord::now(language, text, native))
            .await?;

        Ok(native)
    }
}
