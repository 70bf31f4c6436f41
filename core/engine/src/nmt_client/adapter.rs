//! 语言桥接
//!
//! 把 NmtClient 包装成 `translate(text, src, dst)`，并为每次调用加上超时。

use std::sync::Arc;
use std::time::Duration;

use crate::error::{EngineError, EngineResult};
use crate::types::Language;
use super::{NmtClient, NmtTranslateRequest};

pub struct LanguageBridge {
    client: Arc<dyn NmtClient>,
    timeout: Duration,
}

impl LanguageBridge {
    pub fn new(client: Arc<dyn NmtClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn client(&self) -> &Arc<dyn NmtClient> {
        &self.client
    }

    /// 翻译文本；源语言与目标语言相同时原样返回
    pub async fn translate(&self, text: &str, src: Language, dst: Language) -> EngineResult<String> {
        if src == dst {
            return Ok(text.to_string());
        }

        let req = NmtTranslateRequest {
            src_lang: src.code().to_string(),
            tgt_lang: dst.code().to_string(),
            text: text.to_string(),
        };

        let response = tokio::time::timeout(self.timeout, self.client.translate(&req))
            .await
            .map_err(|_| {
                EngineError::upstream(format!(
                    "Translation timed out after {} ms",
                    self.timeout.as_millis()
                ))
            })?
            .map_err(|e| EngineError::upstream(format!("Translation client error: {e}")))?;

        if !response.ok {
            return Err(EngineError::upstream(
                response.error.unwrap_or_else(|| "Unknown translation error".to_string()),
            ));
        }

        let translated = response
            .text
            .ok_or_else(|| EngineError::upstream("No translation text in response"))?;
        tracing::debug!(src = src.code(), dst = dst.code(), "translated input text");
        Ok(translated)
    }
}
