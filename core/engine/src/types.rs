use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// 日志时间戳格式（本地时间，秒精度）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 请求语言
///
/// English 是分类模型的原生语言；Tamil 输入需要先经过翻译。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Tamil,
}

impl Language {
    /// 分类模型的原生语言
    pub const NATIVE: Language = Language::English;

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Tamil => "tamil",
        }
    }

    /// 翻译服务使用的语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    pub fn parse(value: &str) -> EngineResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "tamil" | "ta" => Ok(Language::Tamil),
            other => Err(EngineError::validation(format!(
                "Unsupported language: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 情绪标签（封闭集合，顺序即趋势表的列顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Joy,
    Sadness,
    Fear,
    Surprise,
    Anger,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Anger,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
        }
    }

    /// 解析英文标签；不在集合内返回 None
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// 精确匹配日志里的标签，不做大小写或空白归一化
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == label)
    }

    /// 在 `ALL` 中的下标
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 按请求语言返回展示用标签
    pub fn localized(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.as_str(),
            Language::Tamil => match self {
                Emotion::Neutral => "நடுநிலை",
                Emotion::Joy => "மகிழ்ச்சி",
                Emotion::Sadness => "வருத்தம்",
                Emotion::Fear => "அச்சம்",
                Emotion::Surprise => "அதிர்ச்சி",
                Emotion::Anger => "கோபம்",
                Emotion::Disgust => "வெறுப்பு",
            },
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 预测日志中的一行
///
/// `text` 是用户提交的原文（翻译前），`emotion` 是模型给出的英文标签。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub timestamp: NaiveDateTime,
    pub language: Language,
    pub text: String,
    pub emotion: String,
}

impl PredictionRecord {
    pub fn now(language: Language, text: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            timestamp: chrono::Local::now().naive_local(),
            language,
            text: text.into(),
            emotion: emotion.as_str().to_string(),
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// 某一小时内各情绪的计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRow {
    pub hour: u32,
    counts: [u64; 7],
}

impl TrendRow {
    pub fn empty(hour: u32) -> Self {
        Self {
            hour,
            counts: [0; 7],
        }
    }

    pub fn increment(&mut self, emotion: Emotion) {
        self.counts[emotion.index()] += 1;
    }

    pub fn count(&self, emotion: Emotion) -> u64 {
        self.counts[emotion.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

// 前端期望扁平结构：{hour, neutral, joy, ...}
impl Serialize for TrendRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1 + Emotion::ALL.len()))?;
        map.serialize_entry("hour", &self.hour)?;
        for emotion in Emotion::ALL {
            map.serialize_entry(emotion.as_str(), &self.count(emotion))?;
        }
        map.end()
    }
}
