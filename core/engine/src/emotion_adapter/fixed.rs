//! 固定标签分类器
//!
//! 不看输入，总是返回配置的情绪。用于离线演示前端趋势图，或在测试里替代模型服务。

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::types::Emotion;
use super::{EmotionAdapter, EmotionRequest, EmotionResponse};

#[derive(Debug, Clone, Copy)]
pub struct FixedEmotionClassifier {
    label: Emotion,
}

impl FixedEmotionClassifier {
    pub fn new(label: Emotion) -> Self {
        Self { label }
    }

    pub fn label(&self) -> Emotion {
        self.label
    }
}

/// 缺省为 neutral，与分类失败时的回退标签一致
impl Default for FixedEmotionClassifier {
    fn default() -> Self {
        Self::new(Emotion::Neutral)
    }
}

#[async_trait]
impl EmotionAdapter for FixedEmotionClassifier {
    async fn analyze(&self, _request: EmotionRequest) -> EngineResult<EmotionResponse> {
        Ok(EmotionResponse {
            label: self.label.as_str().to_string(),
            confidence: 1.0,
        })
    }
}
