//! 原样返回的翻译客户端
//!
//! 离线开发时使用：不调用任何服务，把原文当作译文。

use super::types::{NmtClient, NmtTranslateRequest, NmtTranslateResponse};
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct PassthroughNmtClient;

#[async_trait]
impl NmtClient for PassthroughNmtClient {
    async fn translate(
        &self,
        req: &NmtTranslateRequest,
    ) -> anyhow::Result<NmtTranslateResponse> {
        Ok(NmtTranslateResponse {
            ok: true,
            text: Some(req.text.clone()),
            provider: Some("passthrough".to_string()),
            error: None,
        })
    }
}
