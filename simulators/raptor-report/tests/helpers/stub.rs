//! In-process stand-in for the Raptor v0 service.
//!
//! Keeps samples and results in memory, enforces the bearer token, and counts
//! every request it sees so tests can prove a call never left the client.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use raptor::types::{NewResult, Sample, SampleResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const STUB_CLIENT_ID: &str = "41ae877c-78ca-40e9-8218-89455e1c3520";
pub const STUB_CLIENT_SECRET: &str = "fa5716e7-d6d6-4c76-843f-97a6a066768a";
pub const STUB_TOKEN: &str = "stub-token-0123456789abcdef0123456789abcdef0123456789";
/// Sample whose endpoint answers 200 with an HTML body.
pub const BROKEN_SAMPLE_ID: u64 = 999;

/// Behaviour switches for a stub instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubOptions {
    /// Accept result creation but never store anything.
    pub ignore_creates: bool,
    /// List numeric-looking result values as JSON numbers instead of strings.
    pub numeric_result_values: bool,
    /// Hold every response back for this long.
    pub response_delay: Duration,
}

struct Store {
    options: StubOptions,
    samples: Vec<Sample>,
    results: Vec<SampleResult>,
    next_result_number: u64,
    requests: usize,
}

type Shared = Arc<Mutex<Store>>;

fn lock(state: &Shared) -> MutexGuard<'_, Store> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle for a running stub; the server stops when it is dropped.
pub struct StubServer {
    base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state).requests
    }

    pub fn results(&self, sample_number: u64) -> Vec<SampleResult> {
        lock(&self.state)
            .results
            .iter()
            .filter(|result| result.sample_number == sample_number)
            .cloned()
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_stub() -> StubServer {
    spawn_stub_with(StubOptions::default()).await
}

pub async fn spawn_stub_with(options: StubOptions) -> StubServer {
    let state: Shared = Arc::new(Mutex::new(Store {
        options,
        samples: vec![
            Sample {
                sample_number: 101,
                rssl_code: "RSSL-0101".to_string(),
                description: "Tablet assay, batch 7".to_string(),
            },
            Sample {
                sample_number: 102,
                rssl_code: "RSSL-0102".to_string(),
                description: "Oral solution stability".to_string(),
            },
        ],
        results: vec![SampleResult {
            result_number: 1,
            sample_number: 101,
            result_name: "Assay".to_string(),
            result_value: "98.7".to_string(),
        }],
        next_result_number: 2,
        requests: 0,
    }));

    let app = Router::new()
        .route("/oauth2/token", post(token))
        .route("/raptor/v0/samples", get(list_samples))
        .route("/raptor/v0/samples/:sample_id", get(get_sample))
        .route(
            "/raptor/v0/samples/:sample_id/results",
            get(list_results).post(create_results),
        )
        .route(
            "/raptor/v0/samples/:sample_id/results/:result_id",
            get(get_result).put(update_result).delete(delete_result),
        )
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener address");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubServer {
        base_url: format!("http://{addr}"),
        state,
        handle,
    }
}

async fn count_requests(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let delay = {
        let mut store = lock(&state);
        store.requests += 1;
        store.options.response_delay
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    next.run(request).await
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {STUB_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[derive(Deserialize)]
struct TokenBody {
    grant_type: String,
    client_id: String,
    client_secret: String,
}

async fn token(Json(body): Json<TokenBody>) -> Json<Value> {
    if body.grant_type == "client_credentials"
        && body.client_id == STUB_CLIENT_ID
        && body.client_secret == STUB_CLIENT_SECRET
    {
        Json(json!({ "access_token": STUB_TOKEN, "token_type": "bearer" }))
    } else {
        Json(json!({ "error": "invalid_client" }))
    }
}

async fn list_samples(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(json!({ "samples": lock(&state).samples })))
}

async fn get_sample(
    State(state): State<Shared>,
    Path(sample_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    authorize(&headers)?;
    if sample_id == BROKEN_SAMPLE_ID {
        return Ok((StatusCode::OK, "<html>maintenance</html>").into_response());
    }
    let store = lock(&state);
    let sample = store
        .samples
        .iter()
        .find(|sample| sample.sample_number == sample_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(sample).into_response())
}

fn ensure_sample(store: &Store, sample_id: u64) -> Result<(), StatusCode> {
    if store.samples.iter().any(|sample| sample.sample_number == sample_id) {
        Ok(())
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn list_results(
    State(state): State<Shared>,
    Path(sample_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    let store = lock(&state);
    ensure_sample(&store, sample_id)?;
    let numeric = store.options.numeric_result_values;
    let results: Vec<Value> = store
        .results
        .iter()
        .filter(|result| result.sample_number == sample_id)
        .map(|result| {
            let mut entry = json!(result);
            if let Some(number) = numeric
                .then(|| result.result_value.parse::<f64>().ok())
                .flatten()
            {
                entry["result_value"] = json!(number);
            }
            entry
        })
        .collect();
    Ok(Json(json!({ "results": results })))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreateBody {
    Batch { results: Vec<NewResult> },
    Single(NewResult),
}

async fn create_results(
    State(state): State<Shared>,
    Path(sample_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<CreateBody>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    let mut store = lock(&state);
    ensure_sample(&store, sample_id)?;
    if store.options.ignore_creates {
        return Ok(Json(json!({})));
    }

    let entries = match body {
        CreateBody::Batch { results } => results,
        CreateBody::Single(result) => vec![result],
    };
    for entry in entries {
        let result_number = store.next_result_number;
        store.next_result_number += 1;
        store.results.push(SampleResult {
            result_number,
            sample_number: sample_id,
            result_name: entry.result_name,
            result_value: entry.result_value,
        });
    }
    Ok(Json(json!({})))
}

fn find_result(
    store: &mut Store,
    sample_id: u64,
    result_id: u64,
) -> Result<&mut SampleResult, StatusCode> {
    store
        .results
        .iter_mut()
        .find(|result| result.sample_number == sample_id && result.result_number == result_id)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_result(
    State(state): State<Shared>,
    Path((sample_id, result_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<SampleResult>, StatusCode> {
    authorize(&headers)?;
    let mut store = lock(&state);
    Ok(Json(find_result(&mut store, sample_id, result_id)?.clone()))
}

#[derive(Deserialize)]
struct UpdateBody {
    result_value: String,
}

async fn update_result(
    State(state): State<Shared>,
    Path((sample_id, result_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    let mut store = lock(&state);
    find_result(&mut store, sample_id, result_id)?.result_value = body.result_value;
    Ok(Json(json!({})))
}

async fn delete_result(
    State(state): State<Shared>,
    Path((sample_id, result_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    let mut store = lock(&state);
    let before = store.results.len();
    store
        .results
        .retain(|result| !(result.sample_number == sample_id && result.result_number == result_id));
    if store.results.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({})))
}
