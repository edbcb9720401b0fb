//! Mock provider backend for integration tests
//!
//! Serves both upstream wire formats from one listener: Google under
//! `/google` and Hugging Face under `/hf`. Unless a fixed reply is set, the
//! generated text is `"{model}: {prompt}"` so tests can tell routes apart.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    google_count: AtomicU32,
    hf_count: AtomicU32,
    /// Fixed reply text, possibly empty
    reply: Option<String>,
    /// Status to fail every request with
    fail_status: Option<StatusCode>,
    google_keys: Mutex<Vec<String>>,
    hf_auth: Mutex<Vec<String>>,
    hf_bodies: Mutex<Vec<Value>>,
}

impl MockUpstream {
    pub const GOOGLE_KEY: &'static str = "google-test-key";
    pub const HF_KEY: &'static str = "hf-test-key";

    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None, None).await
    }

    /// Every call succeeds with exactly `reply` as the generated text
    pub async fn start_with_reply(reply: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some(reply.to_owned()), None).await
    }

    /// Every call fails with `status` and a provider-style error body
    pub async fn start_failing(status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(None, Some(status)).await
    }

    async fn start_inner(reply: Option<String>, fail_status: Option<StatusCode>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            google_count: AtomicU32::new(0),
            hf_count: AtomicU32::new(0),
            reply,
            fail_status,
            google_keys: Mutex::new(Vec::new()),
            hf_auth: Mutex::new(Vec::new()),
            hf_bodies: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/google/models/{call}", routing::post(handle_google))
            .route("/hf/models/{*model}", routing::post(handle_hf))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    pub fn google_base_url(&self) -> String {
        format!("http://{}/google", self.addr)
    }

    pub fn hf_base_url(&self) -> String {
        format!("http://{}/hf", self.addr)
    }

    pub fn google_count(&self) -> u32 {
        self.state.google_count.load(Ordering::Relaxed)
    }

    pub fn hf_count(&self) -> u32 {
        self.state.hf_count.load(Ordering::Relaxed)
    }

    /// `x-goog-api-key` values seen, in arrival order
    pub fn google_keys(&self) -> Vec<String> {
        self.state.google_keys.lock().unwrap().clone()
    }

    /// `Authorization` values seen on Hugging Face calls
    pub fn hf_auth(&self) -> Vec<String> {
        self.state.hf_auth.lock().unwrap().clone()
    }

    /// Hugging Face request bodies, in arrival order
    pub fn hf_bodies(&self) -> Vec<Value> {
        self.state.hf_bodies.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

async fn handle_google(
    State(state): State<Arc<MockState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.google_count.fetch_add(1, Ordering::Relaxed);
    state.google_keys.lock().unwrap().push(header_value(&headers, "x-goog-api-key"));

    if let Some(status) = state.fail_status {
        let error = json!({"error": {"code": status.as_u16(), "message": "mock upstream failure", "status": "UNAVAILABLE"}});
        return (status, Json(error)).into_response();
    }

    let Some(model) = call.strip_suffix(":generateContent") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let text = state.reply.clone().unwrap_or_else(|| format!("{model}: {prompt}"));

    if text.is_empty() {
        return Json(json!({"candidates": []})).into_response();
    }

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

async fn handle_hf(
    State(state): State<Arc<MockState>>,
    Path(model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.hf_count.fetch_add(1, Ordering::Relaxed);
    state.hf_auth.lock().unwrap().push(header_value(&headers, "authorization"));
    state.hf_bodies.lock().unwrap().push(body.clone());

    if let Some(status) = state.fail_status {
        return (status, Json(json!({"error": format!("Model {model} is currently loading")}))).into_response();
    }

    let prompt = body["inputs"].as_str().unwrap_or_default();
    let text = state.reply.clone().unwrap_or_else(|| format!("{model}: {prompt}"));

    Json(json!([{"generated_text": text}])).into_response()
}
