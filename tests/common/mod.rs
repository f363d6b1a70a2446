//! Shared utilities for integration testing.
//!
//! `MockBackend` is a programmable axum server on an ephemeral port. It
//! records every request it sees and answers from a table of scripted
//! replies keyed by `"METHOD /path?query"`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use resource_gateway::http::Gateway;
use resource_gateway::session::SessionStore;

pub const COOKIE_PATH: &str = "/api/set-auth-cookie";

/// A canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/html; charset=utf-8"),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as the backend received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Default)]
struct MockState {
    replies: Mutex<HashMap<String, Reply>>,
    recorded: Mutex<Vec<Recorded>>,
}

#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState::default());

        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Script the reply for `"METHOD /path"`.
    pub fn on(&self, route: &str, reply: Reply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(route.to_string(), reply);
        self
    }

    pub fn api_base(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn cookie_base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn gateway(&self, session: SessionStore) -> Gateway {
        Gateway::with_client(
            reqwest::Client::builder().cookie_store(true).build().unwrap(),
            &self.api_base(),
            &self.cookie_base(),
            session,
        )
        .unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    /// Requests other than cookie clears.
    pub fn api_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path != COOKIE_PATH)
            .collect()
    }

    pub fn last_api_request(&self) -> Recorded {
        self.api_requests().pop().expect("no api request recorded")
    }

    pub fn cookie_clears(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == COOKIE_PATH)
            .collect()
    }

    /// Wait until at least `count` cookie clears arrived, or panic.
    pub async fn wait_for_cookie_clears(&self, count: usize) -> Vec<Recorded> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let clears = self.cookie_clears();
            if clears.len() >= count {
                return clears;
            }
            if tokio::time::Instant::now() > deadline {
                panic!("expected {count} cookie clears, saw {}", clears.len());
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    state.recorded.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path_and_query.clone(),
        headers,
        body: body.to_vec(),
    });

    let reply = if path_and_query == COOKIE_PATH {
        Reply::json(200, serde_json::json!({ "success": true }))
    } else {
        let key = format!("{method} {path_and_query}");
        state
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Reply::json(404, serde_json::json!({ "error": format!("no route for {key}") })))
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let mut builder = Response::builder().status(StatusCode::from_u16(reply.status).unwrap());
    if let Some(ct) = reply.content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder.body(Body::from(reply.body)).unwrap()
}

/// Port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
