use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::types::Emotion;
use super::{EmotionAdapter, EmotionRequest, EmotionResponse};

/// 默认关键词表
const DEFAULT_LEXICON: &[(Emotion, &[&str])] = &[
    (
        Emotion::Joy,
        &[
            "happy", "glad", "joy", "joyful", "love", "loved", "great", "wonderful", "awesome",
            "excited", "delighted", "amazing", "fantastic", "pleased", "smile", "fun", "enjoy",
            "enjoyed", "thanks", "thank",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "sad", "unhappy", "cry", "crying", "cried", "lonely", "depressed", "miss", "missed",
            "sorrow", "heartbroken", "grief", "lost", "tears", "upset", "disappointed",
        ],
    ),
    (
        Emotion::Fear,
        &[
            "afraid", "scared", "fear", "terrified", "nervous", "anxious", "worried", "worry",
            "panic", "frightened", "dread", "horror",
        ],
    ),
    (
        Emotion::Surprise,
        &[
            "surprised", "surprise", "wow", "unexpected", "shocked", "astonished", "suddenly",
            "unbelievable", "omg", "whoa",
        ],
    ),
    (
        Emotion::Anger,
        &[
            "angry", "mad", "furious", "hate", "annoyed", "annoying", "rage", "irritated",
            "outraged", "frustrated", "damn",
        ],
    ),
    (
        Emotion::Disgust,
        &[
            "disgusting", "disgusted", "gross", "yuck", "nasty", "revolting", "sick", "awful",
            "vile", "eww",
        ],
    ),
];

/// 基于关键词的情绪分类器
///
/// 在没有模型服务时使用。按命中的关键词数投票，平票时取 `Emotion::ALL` 中靠前的情绪；
/// 没有任何命中返回 neutral。
pub struct RuleBasedEmotionClassifier {
    lexicon: HashMap<String, Emotion>,
}

impl RuleBasedEmotionClassifier {
    pub fn new() -> Self {
        let lexicon = DEFAULT_LEXICON
            .iter()
            .flat_map(|(emotion, words)| words.iter().map(move |w| (w.to_string(), *emotion)))
            .collect();
        Self { lexicon }
    }

    /// 追加或覆盖关键词
    pub fn with_keyword(mut self, word: &str, emotion: Emotion) -> Self {
        self.lexicon.insert(word.to_lowercase(), emotion);
        self
    }

    fn score(&self, text: &str) -> (Emotion, f32) {
        let mut hits = [0usize; 7];
        let mut total = 0usize;

        for token in text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
        {
            total += 1;
            if let Some(emotion) = self.lexicon.get(&token.to_lowercase()) {
                hits[emotion.index()] += 1;
            }
        }

        let mut best = Emotion::Neutral;
        let mut best_hits = 0;
        for emotion in Emotion::ALL {
            let n = hits[emotion.index()];
            if n > best_hits {
                best = emotion;
                best_hits = n;
            }
        }

        if best_hits == 0 || total == 0 {
            return (Emotion::Neutral, 0.5);
        }
        let confidence = (0.5 + best_hits as f32 / total as f32).min(1.0);
        (best, confidence)
    }
}

impl Default for RuleBasedEmotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmotionAdapter for RuleBasedEmotionClassifier {
    async fn analyze(&self, request: EmotionRequest) -> EngineResult<EmotionResponse> {
        let (emotion, confidence) = self.score(&request.text);
        Ok(EmotionResponse {
            label: emotion.as_str().to_string(),
            confidence,
        })
    }
}
