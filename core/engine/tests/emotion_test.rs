use std::time::Duration;

use emotion_engine::emotion_adapter::{
    EmotionAdapter, EmotionRequest, EmotionResponse, FixedEmotionClassifier,
    HttpEmotionClassifier, RuleBasedEmotionClassifier,
};
use emotion_engine::error::{EngineResult, ErrorKind};
use emotion_engine::types::Emotion;

/// 固定标签分类器（不依赖模型服务）
#[tokio::test]
async fn test_fixed_classifier() {
    let fixed = FixedEmotionClassifier::default();
    assert_eq!(fixed.label(), Emotion::Neutral);

    let request = EmotionRequest {
        text: "I am so happy today".to_string(),
        lang: "en".to_string(),
    };
    let response = fixed.analyze(request).await.unwrap();
    assert_eq!(response.label, "neutral");
    assert!(response.confidence > 0.0 && response.confidence <= 1.0);

    let fearful = FixedEmotionClassifier::new(Emotion::Fear);
    assert_eq!(fearful.classify("what a lovely day").await.unwrap(), Emotion::Fear);
    assert_eq!(fearful.endpoint(), None);
}

#[tokio::test]
async fn test_rule_based_classify() {
    let classifier = RuleBasedEmotionClassifier::new();

    let test_cases = vec![
        ("I am so happy today, I love it!", Emotion::Joy),
        ("I feel sad and lonely", Emotion::Sadness),
        ("I'm terrified of the dark", Emotion::Fear),
        ("Wow, I did not expect that, I'm shocked", Emotion::Surprise),
        ("I am furious and angry", Emotion::Anger),
        ("That smell is disgusting", Emotion::Disgust),
        ("The train leaves at noon", Emotion::Neutral),
    ];

    for (text, expected) in test_cases {
        let emotion = classifier.classify(text).await.unwrap();
        assert_eq!(emotion, expected, "text: {text}");
    }
}

#[tokio::test]
async fn test_rule_based_confidence_range() {
    let classifier = RuleBasedEmotionClassifier::new();
    let response = classifier
        .analyze(EmotionRequest {
            text: "happy happy happy".to_string(),
            lang: "en".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.label, "joy");
    assert!(response.confidence > 0.5 && response.confidence <= 1.0);
}

/// 标签不在封闭集合内时 classify 报错
#[tokio::test]
async fn test_classify_rejects_unknown_label() {
    struct OddModel;

    #[async_trait::async_trait]
    impl EmotionAdapter for OddModel {
        async fn analyze(&self, _request: EmotionRequest) -> EngineResult<EmotionResponse> {
            Ok(EmotionResponse {
                label: "shame".to_string(),
                confidence: 0.7,
            })
        }
    }

    let err = OddModel.classify("text").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(err.message().contains("shame"));
}

#[tokio::test]
async fn test_http_classifier_unreachable() {
    let classifier = HttpEmotionClassifier::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    assert_eq!(classifier.endpoint(), Some("http://127.0.0.1:9"));

    let err = classifier.classify("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
}
