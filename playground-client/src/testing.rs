//! In-process API server for tests
//!
//! [`CannedServer`] binds an ephemeral local port, answers every request with
//! whatever its responder returns and records the requests in arrival order,
//! so tests can drive a real [`BaasClient`] and assert on the traffic.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::BaasClient;

pub use axum::http::StatusCode;

/// Path prefix the client endpoint carries
const API_PREFIX: &str = "/v1";

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below the `/v1` prefix, e.g. `/databases`
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Body decoded as JSON, `Null` for anything else
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// `METHOD /path`
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Answer for one request
#[derive(Debug, Clone)]
pub enum Canned {
    Json(StatusCode, Value),
    NoContent,
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Canned::Json(StatusCode::OK, body)
    }

    pub fn created(body: Value) -> Self {
        Canned::Json(StatusCode::CREATED, body)
    }

    /// Error body in the shape the API uses
    pub fn error(status: StatusCode, message: &str) -> Self {
        Canned::Json(
            status,
            json!({
                "message": message,
                "code": status.as_u16(),
                "type": "general_server_error",
            }),
        )
    }
}

type Responder = dyn Fn(&RecordedRequest) -> Canned + Send + Sync;

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

/// Local HTTP server answering with canned responses
pub struct CannedServer {
    endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl CannedServer {
    pub async fn start<F>(responder: F) -> std::io::Result<Self>
    where
        F: Fn(&RecordedRequest) -> Canned + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };

        let app = Router::new()
            .fallback(answer)
            .layer(DefaultBodyLimit::disable())
            .with_state(state);

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Test server stopped: {}", e);
            }
        });

        Ok(Self {
            endpoint: format!("http://{}{}", addr, API_PREFIX),
            requests,
            task,
        })
    }

    /// Client for this server, scoped to project `test` with key `secret`
    pub fn client(&self) -> BaasClient {
        let http = Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|_| Client::new());

        BaasClient::with_client(self.endpoint.clone(), http)
            .with_project("test")
            .with_key("secret")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Request lines in arrival order
    pub fn lines(&self) -> Vec<String> {
        self.requests().iter().map(RecordedRequest::line).collect()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn answer(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    let request = RecordedRequest {
        method,
        path: path.strip_prefix(API_PREFIX).unwrap_or(path).to_string(),
        headers,
        body,
    };

    let canned = (state.responder)(&request);
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    match canned {
        Canned::Json(status, body) => (status, Json(body)).into_response(),
        Canned::NoContent => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Writes `contents` to a file in the system temp directory
///
/// The name is prefixed with the process id so parallel test binaries do not
/// collide.
pub fn temp_file(name: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("playground-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents)?;
    Ok(path)
}
