mod fixed;
mod http_classifier;
mod rule_based;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::Emotion;

pub use fixed::FixedEmotionClassifier;
pub use http_classifier::HttpEmotionClassifier;
pub use rule_based::RuleBasedEmotionClassifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionRequest {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionResponse {
    pub label: String,        // 英文标签: "neutral" | "joy" | "sadness" | "fear" | "surprise" | "anger" | "disgust"
    pub confidence: f32,      // 置信度: 0.0 - 1.0
}

/// 情绪分类适配器
///
/// 分类器只理解英文，调用方负责在此之前完成翻译。
#[async_trait]
pub trait EmotionAdapter: Send + Sync {
    async fn analyze(&self, request: EmotionRequest) -> EngineResult<EmotionResponse>;

    /// 远程服务地址（用于健康检查），本地实现返回 None
    fn endpoint(&self) -> Option<&str> {
        None
    }

    /// 分类并校验标签属于封闭集合
    async fn classify(&self, text: &str) -> EngineResult<Emotion> {
        let response = self
            .analyze(EmotionRequest {
                text: text.to_string(),
                lang: "en".to_string(),
            })
            .await?;
        Emotion::parse(&response.label).ok_or_else(|| {
            EngineError::upstream(format!("Classifier returned unknown label: {}", response.label))
        })
    }
}
