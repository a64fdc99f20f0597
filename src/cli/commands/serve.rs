//! HTTP API server.
//!
//! One shared chat session per server process, guarded by a mutex so questions are answered in
//! the order they arrive.

use crate::astrology::format::format_birth_datetime;
use crate::astrology::{parse_birth_datetime, BirthQuery, Chart, HoroscopeError};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::session::{ChatTurn, SessionHistory};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
pub struct AppState {
    orchestrator: Orchestrator,
    session: Mutex<SessionHistory>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            session: Mutex::new(SessionHistory::new()),
        }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/history", get(history).delete(clear_history))
        .route("/horoscope", post(horoscope))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    if !orchestrator.has_knowledge_base() {
        Output::warning("No knowledge base available; answers will have no context.");
    }

    let app = router(Arc::new(AppState::new(orchestrator)));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::header("Raavan API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Ask", "POST   /ask");
    Output::kv("History", "GET    /history");
    Output::kv("Clear history", "DELETE /history");
    Output::kv("Horoscope", "POST   /horoscope");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Serialize)]
struct HistoryResponse {
    turns: Vec<ChatTurn>,
    total: usize,
}

#[derive(Deserialize)]
struct HoroscopeRequest {
    name: String,
    location: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    date: Option<String>,
    /// `HH:MM`, Universal Time
    #[serde(default)]
    time: Option<String>,
}

#[derive(Serialize)]
struct HoroscopeResponse {
    name: String,
    location: String,
    birth_datetime: String,
    chart: Chart,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "knowledge_base": state.orchestrator.has_knowledge_base(),
        "model": state.orchestrator.settings().llm.model,
    }))
}

/// Failed turns are still `200 OK`; the turn's `outcome` says what happened.
async fn ask(State(state): State<Arc<AppState>>, Json(req): Json<AskRequest>) -> impl IntoResponse {
    let question = req.question.trim();
    if question.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "question must not be empty");
    }

    let mut session = state.session.lock().await;
    let turn = state
        .orchestrator
        .ask_with_history(&mut session, question)
        .await;
    Json(turn).into_response()
}

async fn history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(HistoryResponse {
        turns: session.all().to_vec(),
        total: session.len(),
    })
}

async fn clear_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    let cleared = session.len();
    session.clear();
    Json(serde_json::json!({ "cleared": cleared }))
}

async fn horoscope(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HoroscopeRequest>,
) -> impl IntoResponse {
    let defaults = &state.orchestrator.settings().horoscope;
    let datetime = match parse_birth_datetime(req.date.as_deref(), req.time.as_deref(), defaults) {
        Ok(dt) => dt,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let query = BirthQuery::new(req.name, datetime, req.location);
    match state.orchestrator.horoscope(&query) {
        Ok(chart) => Json(HoroscopeResponse {
            name: query.name.trim().to_string(),
            location: query.location.trim().to_string(),
            birth_datetime: format_birth_datetime(&query.datetime),
            chart,
        })
        .into_response(),
        Err(e @ HoroscopeError::InvalidInput(_)) => error_response(StatusCode::BAD_REQUEST, e),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astrology::HoroscopeCalculator;
    use crate::config::Prompts;
    use crate::rag::{AnswerError, Answerer};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct EchoAnswerer;

    #[async_trait]
    impl Answerer for EchoAnswerer {
        async fn answer(&self, question: &str, _context: &str) -> Result<String, AnswerError> {
            if question.contains("fail") {
                return Err(AnswerError::Network("connection refused".to_string()));
            }
            Ok(format!("Hear me: {}", question))
        }
    }

    async fn spawn_app() -> String {
        let orchestrator = Orchestrator::with_components(
            Settings::default(),
            Prompts::default(),
            Arc::new(EchoAnswerer),
            HoroscopeCalculator::default(),
        );
        let app = router(Arc::new(AppState::new(orchestrator)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app().await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["knowledge_base"], false);
    }

    #[tokio::test]
    async fn test_ask_history_and_clear() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let turn: Value = client
            .post(format!("{}/ask", base))
            .json(&json!({ "question": "Who is Mandodari?" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(turn["answer"], "Hear me: Who is Mandodari?");
        assert_eq!(turn["outcome"], "answered");

        let failed: Value = client
            .post(format!("{}/ask", base))
            .json(&json!({ "question": "please fail" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(failed["outcome"], "failed");
        assert_eq!(failed["answer"], "⚠ Network error: connection refused");

        let history: Value = client
            .get(format!("{}/history", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(history["total"], 2);
        assert_eq!(history["turns"][0]["question"], "Who is Mandodari?");

        let cleared: Value = client
            .delete(format!("{}/history", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(cleared["cleared"], 2);

        let history: Value = client
            .get(format!("{}/history", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(history["total"], 0);
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let base = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .json(&json!({ "question": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_horoscope_endpoint() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/horoscope", base))
            .json(&json!({ "name": "Sita", "location": "Mithila", "date": "2000-01-01", "time": "12:00" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["birth_datetime"], "January 01, 2000 at 12:00 PM");
        assert_eq!(body["chart"]["positions"].as_array().unwrap().len(), 10);
        assert_eq!(body["chart"]["positions"][0]["body"], "Sun");
        assert_eq!(body["chart"]["positions"][0]["sign"], "Capricorn");

        let invalid = client
            .post(format!("{}/horoscope", base))
            .json(&json!({ "name": "Sita", "location": "" }))
            .send()
            .await
            .unwrap();
        assert_eq!(invalid.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = invalid.json().await.unwrap();
        assert_eq!(body["error"], "Please provide both name and birth location.");
    }
}
