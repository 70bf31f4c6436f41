//! 远程情绪分类客户端
//!
//! 连接到加载了预训练模型的分类服务（`POST /v1/classify`）。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use super::{EmotionAdapter, EmotionRequest, EmotionResponse};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    label: String,
    #[serde(default = "default_confidence")]
    score: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// 远程情绪分类客户端
#[derive(Clone)]
pub struct HttpEmotionClassifier {
    base_url: String,
    http: Client,
}

impl HttpEmotionClassifier {
    /// 创建新的客户端
    ///
    /// # Arguments
    /// * `url` - 服务基础 URL，例如 "http://127.0.0.1:5010"
    /// * `timeout` - 单次请求超时
    pub fn new(url: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn request(&self, text: &str) -> anyhow::Result<ClassifyResponse> {
        let url = format!("{}/v1/classify", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&ClassifyRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP error: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EmotionAdapter for HttpEmotionClassifier {
    async fn analyze(&self, request: EmotionRequest) -> EngineResult<EmotionResponse> {
        let body = self
            .request(&request.text)
            .await
            .map_err(|e| EngineError::upstream(format!("Classifier service error: {e}")))?;

        Ok(EmotionResponse {
            label: body.label,
            confidence: body.score.clamp(0.0, 1.0),
        })
    }

    fn endpoint(&self) -> Option<&str> {
        Some(&self.base_url)
    }
}
