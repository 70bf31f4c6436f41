//! HTTP 接口
//!
//! - `GET  /get_emotion_data?date=YYYY-MM-DD` 每日 24 小时情绪分布
//! - `POST /analyze` 文本情绪预测
//! - `GET  /run_emotion_detection` / `GET /stop_emotion_detection` 面部检测进程控制
//! - `GET  /health` 健康检查

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::bootstrap::{EmotionEngine, EngineHealth};
use crate::error::{EngineError, ErrorKind};
use crate::prediction_service::validate_text;
use crate::trend_aggregator::parse_date;
use crate::types::{Language, TrendRow};

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<EmotionEngine>,
}

pub fn router(engine: Arc<EmotionEngine>) -> Router {
    Router::new()
        .route("/get_emotion_data", get(get_emotion_data))
        .route("/analyze", post(analyze))
        .route("/run_emotion_detection", get(run_emotion_detection))
        .route("/stop_emotion_detection", get(stop_emotion_detection))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(AppState { engine })
}

/// 错误响应：`{error, status: "error"}`
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    status: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.message().to_string(),
            status: STATUS_ERROR,
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct TrendQuery {
    date: Option<String>,
}

#[derive(Debug, Serialize)]
struct TrendResponse {
    date: String,
    data: Vec<TrendRow>,
    status: &'static str,
}

/// 趋势端点；缺省日期为服务器本地当天
async fn get_emotion_data(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, ApiError> {
    let date = match query.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };

    let data = state.engine.trends().aggregate(date).await?;

    Ok(Json(TrendResponse {
        date: date.format("%Y-%m-%d").to_string(),
        data,
        status: STATUS_SUCCESS,
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: String,
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    text: String,
    language: Language,
    emotion: String,
    status: &'static str,
}

/// 文本情绪预测端点；缺省语言为 english
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload
        .map_err(|e| EngineError::validation(format!("Invalid request body: {}", e.body_text())))?;

    let text = validate_text(&request.text)?;
    let language = match request.language.as_deref() {
        Some(value) => Language::parse(value)?,
        None => Language::English,
    };

    let prediction = state.engine.prediction().predict(text, language).await?;

    Ok(Json(AnalyzeResponse {
        text: text.to_string(),
        language,
        emotion: prediction.emotion,
        status: STATUS_SUCCESS,
    }))
}

#[derive(Debug, Serialize)]
struct ProcessResponse {
    status: &'static str,
}

async fn run_emotion_detection(
    State(state): State<AppState>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let outcome = state.engine.detection().start().await?;
    Ok(Json(ProcessResponse {
        status: outcome.as_str(),
    }))
}

async fn stop_emotion_detection(
    State(state): State<AppState>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let outcome = state.engine.detection().stop().await?;
    Ok(Json(ProcessResponse {
        status: outcome.as_str(),
    }))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    services: EngineHealth,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        services: state.engine.health().await,
    })
}
