//! 文本情绪预测流程测试

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use emotion_engine::emotion_adapter::{
    EmotionAdapter, EmotionRequest, EmotionResponse, RuleBasedEmotionClassifier,
};
use emotion_engine::error::{EngineError, EngineResult, ErrorKind};
use emotion_engine::nmt_client::{
    LanguageBridge, NmtClient, NmtTranslateRequest, NmtTranslateResponse, PassthroughNmtClient,
};
use emotion_engine::prediction_log::PredictionLogger;
use emotion_engine::prediction_service::PredictionService;
use emotion_engine::types::{Emotion, Language};
use tempfile::TempDir;

/// 记录收到的请求并返回固定译文
struct MockTranslator {
    reply: Option<String>,
    seen: Mutex<Vec<NmtTranslateRequest>>,
}

impl MockTranslator {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NmtClient for MockTranslator {
    async fn translate(&self, req: &NmtTranslateRequest) -> anyhow::Result<NmtTranslateResponse> {
        self.seen.lock().unwrap().push(req.clone());
        match &self.reply {
            Some(text) => Ok(NmtTranslateResponse {
                ok: true,
                text: Some(text.clone()),
                provider: Some("mock".to_string()),
                error: None,
            }),
            None => Err(anyhow::anyhow!("translation service unreachable")),
        }
    }
}

/// 返回固定标签，记录收到的文本
struct MockClassifier {
    label: &'static str,
    delay: Duration,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl MockClassifier {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    fn slow(label: &'static str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(label)
        }
    }
}

#[async_trait]
impl EmotionAdapter for MockClassifier {
    async fn analyze(&self, request: EmotionRequest) -> EngineResult<EmotionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(request.text);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(EmotionResponse {
            label: self.label.to_string(),
            confidence: 0.9,
        })
    }
}

struct FailingClassifier;

#[async_trait]
impl EmotionAdapter for FailingClassifier {
    async fn analyze(&self, _request: EmotionRequest) -> EngineResult<EmotionResponse> {
        Err(EngineError::upstream("model crashed"))
    }
}

fn service(
    translator: Arc<dyn NmtClient>,
    classifier: Arc<dyn EmotionAdapter>,
    logger: Arc<PredictionLogger>,
) -> PredictionService {
    PredictionService::new(
        LanguageBridge::new(translator, Duration::from_secs(1)),
        classifier,
        logger,
        Duration::from_millis(100),
    )
}

#[tokio::test]
async fn test_english_prediction_is_logged() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let translator = Arc::new(MockTranslator::replying("unused"));
    let svc = service(translator.clone(), Arc::new(MockClassifier::new("joy")), logger.clone());

    let prediction = svc.predict("  what a day  ", Language::English).await.unwrap();

    assert_eq!(prediction.emotion, "joy");
    assert_eq!(prediction.native, Emotion::Joy);
    assert!(!prediction.is_fallback());
    assert!(translator.seen.lock().unwrap().is_empty());

    let records = logger.read_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].language, Language::English);
    assert_eq!(records[0].text, "what a day");
    assert_eq!(records[0].emotion, "joy");
}

#[tokio::test]
async fn test_tamil_is_translated_logged_as_submitted_and_localized() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let translator = Arc::new(MockTranslator::replying("I am very happy"));
    let classifier = Arc::new(MockClassifier::new("joy"));
    let svc = service(translator.clone(), classifier.clone(), logger.clone());

    let prediction = svc.predict("நான் மிகவும் மகிழ்ச்சியாக இருக்கிறேன்", Language::Tamil).await.unwrap();

    assert_eq!(prediction.emotion, "மகிழ்ச்சி");
    assert_eq!(prediction.native, Emotion::Joy);

    let seen = translator.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].src_lang, "ta");
    assert_eq!(seen[0].tgt_lang, "en");
    assert_eq!(classifier.texts.lock().unwrap().as_slice(), ["I am very happy"]);

    let records = logger.read_all().await.unwrap();
    assert_eq!(records[0].language, Language::Tamil);
    assert_eq!(records[0].text, "நான் மிகவும் மகிழ்ச்சியாக இருக்கிறேன்");
    assert_eq!(records[0].emotion, "joy");
}

#[tokio::test]
async fn test_blank_text_rejected_before_classification() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let classifier = Arc::new(MockClassifier::new("joy"));
    let svc = service(
        Arc::new(PassthroughNmtClient),
        classifier.clone(),
        logger.clone(),
    );

    for text in ["", "   ", "\n\t"] {
        let err = svc.predict(text, Language::Tamil).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert!(!logger.path().exists());
}

#[tokio::test]
async fn test_translation_failure_falls_back_to_localized_neutral() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let classifier = Arc::new(MockClassifier::new("anger"));
    let svc = service(Arc::new(MockTranslator::failing()), classifier.clone(), logger.clone());

    let prediction = svc.predict("கோபமாக இருக்கிறது", Language::Tamil).await.unwrap();

    assert_eq!(prediction.emotion, "நடுநிலை");
    assert!(prediction.is_fallback());
    assert!(prediction.fallback.unwrap().contains("unreachable"));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert!(!logger.path().exists());
}

#[tokio::test]
async fn test_classifier_failure_falls_back_to_neutral() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let svc = service(Arc::new(PassthroughNmtClient), Arc::new(FailingClassifier), logger);

    let prediction = svc.predict("anything", Language::English).await.unwrap();
    assert_eq!(prediction.emotion, "neutral");
    assert_eq!(prediction.native, Emotion::Neutral);
    assert!(prediction.is_fallback());
}

#[tokio::test]
async fn test_unknown_label_falls_back_to_neutral() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let svc = service(
        Arc::new(PassthroughNmtClient),
        Arc::new(MockClassifier::new("love")),
        logger.clone(),
    );

    let prediction = svc.predict("hello", Language::English).await.unwrap();
    assert_eq!(prediction.emotion, "neutral");
    assert!(prediction.is_fallback());
    assert!(!logger.path().exists());
}

#[tokio::test]
async fn test_slow_classifier_times_out() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let svc = service(
        Arc::new(PassthroughNmtClient),
        Arc::new(MockClassifier::slow("joy", Duration::from_secs(2))),
        logger,
    );

    let prediction = svc.predict("hello", Language::English).await.unwrap();
    assert!(prediction.is_fallback());
    assert!(prediction.fallback.unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_log_write_failure_falls_back_to_neutral() {
    let dir = TempDir::new().unwrap();
    // 日志路径是目录，写入必然失败
    let logger = Arc::new(PredictionLogger::new(dir.path()));
    let svc = service(
        Arc::new(PassthroughNmtClient),
        Arc::new(MockClassifier::new("sadness")),
        logger,
    );

    let prediction = svc.predict("I miss home", Language::Tamil).await.unwrap();
    assert_eq!(prediction.emotion, "நடுநிலை");
    assert!(prediction.is_fallback());
}

#[tokio::test]
async fn test_rule_based_labels_stay_in_closed_set() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(PredictionLogger::new(dir.path().join("log.csv")));
    let svc = service(
        Arc::new(PassthroughNmtClient),
        Arc::new(RuleBasedEmotionClassifier::new()),
        logger,
    );

    let inputs = [
        "I love this",
        "so scared right now",
        "that is gross",
        "wow, unexpected!",
        "I hate waiting",
        "just a normal sentence",
        "12345",
    ];
    for text in inputs {
        let english = svc.predict(text, Language::English).await.unwrap();
        assert!(Emotion::parse(&english.emotion).is_some(), "{}", english.emotion);

        let tamil = svc.predict(text, Language::Tamil).await.unwrap();
        assert!(Emotion::ALL
            .iter()
            .any(|e| e.localized(Language::Tamil) == tamil.emotion));
    }
}
