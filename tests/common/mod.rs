//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use shipi18n::{
    Error, Shipi18nClient,
    api::{HttpRequest, HttpResponse, Transport},
    config::Configuration,
};
use tower::ServiceExt;

/// Transport answering with a fixed response or failure, recording every request
#[derive(Debug)]
pub struct StubTransport {
    reply: Result<HttpResponse, String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn sent_bodies(&self) -> Vec<Value> {
        self.requests()
            .iter()
            .map(|r| serde_json::from_str(r.body.as_deref().unwrap_or("null")).unwrap())
            .collect()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &HttpRequest) -> shipi18n::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(Error::Transport)
    }
}

/// Proxy router whose client holds `server-key` and talks to `transport`
pub fn proxy_app(transport: &Arc<StubTransport>) -> Router {
    let config = Configuration::new()
        .api_key("server-key")
        .api_url("https://api.example.test")
        .build();
    shipi18n::proxy::router(Shipi18nClient::with_transport(config, Arc::clone(transport)))
}

/// Send a request through `app`, returning the status and the body parsed as JSON
/// (`Value::Null` for an empty body)
pub async fn call(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}
