//! 翻译客户端类型定义

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 翻译请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NmtTranslateRequest {
    pub src_lang: String,
    pub tgt_lang: String,
    pub text: String,
}

/// 翻译响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NmtTranslateResponse {
    pub ok: bool,
    pub text: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 翻译客户端 trait
#[async_trait]
pub trait NmtClient: Send + Sync {
    /// 执行翻译
    async fn translate(
        &self,
        req: &NmtTranslateRequest,
    ) -> anyhow::Result<NmtTranslateResponse>;

    /// 远程服务地址（用于健康检查），本地实现返回 None
    fn endpoint(&self) -> Option<&str> {
        None
    }
}
