//! 健康检查模块
//!
//! 用于检查翻译服务和分类服务的健康状态

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// 服务健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub is_healthy: bool,
    pub service_name: String,
    /// 本地实现为 None
    pub url: Option<String>,
    pub error: Option<String>,
}

impl ServiceHealth {
    /// 进程内实现，总是健康
    pub fn local(service_name: &str) -> Self {
        Self {
            is_healthy: true,
            service_name: service_name.to_string(),
            url: None,
            error: None,
        }
    }
}

/// 健康检查器
pub struct HealthChecker {
    http: Client,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// 检查远程服务的 `/health`
    pub async fn check_service(&self, service_name: &str, base_url: &str) -> ServiceHealth {
        let url = format!("{}/health", base_url.trim_end_matches('/'));
        let error = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => None,
            Ok(response) => Some(format!("HTTP {}", response.status())),
            Err(e) => Some(e.to_string()),
        };

        ServiceHealth {
            is_healthy: error.is_none(),
            service_name: service_name.to_string(),
            url: Some(base_url.to_string()),
            error,
        }
    }

    /// 有地址时探测远程服务，否则视为本地实现
    pub async fn check_optional(&self, service_name: &str, base_url: Option<&str>) -> ServiceHealth {
        match base_url {
            Some(url) => self.check_service(service_name, url).await,
            None => ServiceHealth::local(service_name),
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}
