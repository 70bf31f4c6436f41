//! 服务配置
//!
//! 从 TOML 文件加载；所有字段都有默认值，配置文件不存在时使用默认配置。

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::types::Emotion;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "emotion_server.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub log: LogConfig,
    pub classifier: ClassifierConfig,
    pub translation: TranslationConfig,
    pub detection: DetectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 预测日志（CSV）路径
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("emotion_predictions_log.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// 关键词规则分类（无需模型服务）
    RuleBased,
    /// 远程模型服务
    Http,
    /// 总是返回 `fixed_label`
    #[serde(alias = "stub")]
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    pub url: String,
    pub timeout_ms: u64,
    /// `kind = "fixed"` 时返回的标签
    pub fixed_label: Emotion,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::RuleBased,
            url: "http://127.0.0.1:5010".to_string(),
            timeout_ms: 5000,
            fixed_label: Emotion::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationKind {
    Http,
    /// 原样返回（离线开发用）
    Passthrough,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub kind: TranslationKind,
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            kind: TranslationKind::Http,
            url: "http://127.0.0.1:5008".to_string(),
            api_key: None,
            timeout_ms: 5000,
        }
    }
}

/// 面部情绪检测脚本的启动参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub program: String,
    pub args: Vec<String>,
    /// 发送 kill 后等待进程退出的上限
    pub stop_timeout_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["face_emotion_detector.py".to_string()],
            stop_timeout_ms: 3000,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        toml::from_str(content)
            .map_err(|e| EngineError::config(format!("Failed to parse config file: {e}")))
    }

    /// 加载配置文件；文件不存在时返回默认配置
    pub fn load(path: &Path) -> EngineResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.classifier.kind, ClassifierKind::RuleBased);
        assert_eq!(config.detection.args, vec!["face_emotion_detector.py"]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [translation]
            kind = "passthrough"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.translation.kind, TranslationKind::Passthrough);
        assert_eq!(config.translation.timeout_ms, 5000);
    }

    #[test]
    fn sample_config_parses() {
        let config =
            ServerConfig::from_toml_str(include_str!("../../../../emotion_server.toml")).unwrap();
        assert_eq!(config.translation.kind, TranslationKind::Http);
        assert_eq!(config.detection.stop_timeout_ms, 3000);
    }

    #[test]
    fn fixed_classifier_label_is_configurable() {
        let config =
            ServerConfig::from_toml_str("[classifier]\nkind = \"fixed\"\nfixed_label = \"sadness\"")
                .unwrap();
        assert_eq!(config.classifier.kind, ClassifierKind::Fixed);
        assert_eq!(config.classifier.fixed_label, Emotion::Sadness);

        let legacy = ServerConfig::from_toml_str("[classifier]\nkind = \"stub\"").unwrap();
        assert_eq!(legacy.classifier.kind, ClassifierKind::Fixed);
        assert_eq!(legacy.classifier.fixed_label, Emotion::Neutral);
    }

    #[test]
    fn unknown_kind_is_config_error() {
        let err = ServerConfig::from_toml_str("[classifier]\nkind = \"magic\"").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
