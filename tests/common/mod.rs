//! Stub CommunityAPI server for integration tests
//!
//! Every request is recorded; responses are scripted per `(method, path)`.
//! Unscripted routes answer 404 with a JSON error body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use community_hub::client::{HttpCommunityApi, StaticToken, TokenSource};
use community_hub::config::ApiConfig;

/// A request as the stub received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Script a JSON response
    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Script a response with an arbitrary body
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// `METHOD /path` of every recorded request, in order
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }

    pub fn api_with(&self, tokens: Arc<dyn TokenSource>) -> HttpCommunityApi {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        };
        HttpCommunityApi::new(&config, tokens).unwrap()
    }

    pub fn api(&self, token: Option<&str>) -> HttpCommunityApi {
        self.api_with(Arc::new(StaticToken(token.map(str::to_string))))
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_value("authorization"),
        content_type: header_value("content-type"),
        request_id: header_value("x-request-id"),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().unwrap().push(recorded);

    let (status, body) = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned()
        .unwrap_or((404, r#"{"message":"No such route"}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
