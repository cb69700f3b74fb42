//!
//! _Proxy endpoint_
//!
//! `POST /api/translate` for callers that must never see the API key, usually a browser.
//! The request is checked here and forwarded through a [`Shipi18nClient`] holding the key.
//!
//! Responses:
//! - `200` with the translation result as returned by the API
//! - `400` with `{"error": "..."}` when the body is invalid
//! - `500` with `{"error": "..."}` for every other failure
//!
//! Rate limiting, authentication or caching go in as extra layers on [`router`],
//! the request and response shapes stay the same.
//!

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use log::{error, info, warn};
use serde_json::{Map, Value, json};

use crate::{
    Shipi18nClient,
    api::Transport,
    config::TranslateOptions,
    error::{Error, TARGET_LANGUAGE_REQUIRED, TEXT_REQUIRED},
};

/// Message used when an error carries no message of its own
pub const TRANSLATION_FAILED: &str = "Translation failed";
/// Message used when the body is not a JSON object or a target is not a string
pub const INVALID_BODY: &str = "Invalid request body";

/// Body accepted by the proxy, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    ///Required, must not be empty
    pub text: String,
    ///Required, must not be empty
    pub target_languages: Vec<String>,
    ///Default: true
    pub preserve_placeholders: bool,
    ///`json` translates `text` as a JSON document, anything else as plain text
    pub output_format: Option<String>,
    ///Default: en
    pub source_language: String,
    ///Default: true
    pub enable_pluralization: bool,
}

impl ProxyRequest {
    /// Read a request body, returning the message to reject it with.
    ///
    /// `text` is checked first, then `targetLanguages`, then the shape of the targets.
    /// Optional fields of the wrong type fall back to their defaults.
    pub fn parse(body: &[u8]) -> std::result::Result<Self, &'static str> {
        let object: Map<String, Value> =
            serde_json::from_slice(body).map_err(|_| INVALID_BODY)?;

        let text = object
            .get("text")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(TEXT_REQUIRED)?;

        let targets = object
            .get("targetLanguages")
            .and_then(Value::as_array)
            .filter(|t| !t.is_empty())
            .ok_or(TARGET_LANGUAGE_REQUIRED)?;
        let target_languages = targets
            .iter()
            .map(|lang| lang.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or(INVALID_BODY)?;

        let flag = |name: &str| object.get(name).and_then(Value::as_bool).unwrap_or(true);

        Ok(Self {
            text: text.to_string(),
            target_languages,
            preserve_placeholders: flag("preservePlaceholders"),
            output_format: object
                .get("outputFormat")
                .and_then(Value::as_str)
                .map(str::to_string),
            source_language: object
                .get("sourceLanguage")
                .and_then(Value::as_str)
                .unwrap_or("en")
                .to_string(),
            enable_pluralization: flag("enablePluralization"),
        })
    }

    /// Translate `text` as a JSON document
    pub fn is_json(&self) -> bool {
        self.output_format.as_deref() == Some("json")
    }
}

/// Status and JSON body sent back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body
    pub body: Value,
}

impl ProxyResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Validate a raw request body and forward it through `client`.
///
/// Blocks for the duration of the upstream call.
pub fn handle_translate<T: Transport>(client: &Shipi18nClient<T>, body: &[u8]) -> ProxyResponse {
    let request = match ProxyRequest::parse(body) {
        Ok(request) => request,
        Err(message) => {
            warn!("Rejected translation request: {message}");
            return ProxyResponse::error(StatusCode::BAD_REQUEST, message);
        }
    };

    let options = TranslateOptions::new()
        .source_lang(request.source_language.as_str())
        .add_target_langs(request.target_languages.clone())
        .preserve_placeholders(request.preserve_placeholders)
        .enable_pluralization(request.enable_pluralization)
        .build();

    let json_mode = request.is_json();
    info!(
        "Translating {} characters into {:?} (json: {json_mode})",
        request.text.len(),
        options.target_languages
    );

    let outcome = if json_mode {
        client
            .translate_json(request.text, &options)
            .and_then(|result| serde_json::to_value(result).map_err(Error::Serialization))
    } else {
        client
            .translate(&request.text, &options)
            .and_then(|result| serde_json::to_value(result).map_err(Error::Serialization))
    };

    match outcome {
        Ok(result) => ProxyResponse::ok(result),
        Err(e) if e.is_validation() => {
            warn!("Rejected translation request: {e}");
            ProxyResponse::error(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            error!("Translation failed: {e}");
            let message = e.to_string();
            let message = if message.is_empty() {
                TRANSLATION_FAILED
            } else {
                message.as_str()
            };
            ProxyResponse::error(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

/// Routes of the proxy: `POST /api/translate` and a `GET /health` liveness probe
pub fn router<T: Transport + 'static>(client: Shipi18nClient<T>) -> Router {
    Router::new()
        .route("/api/translate", post(translate::<T>))
        .route("/health", get(health))
        .with_state(Arc::new(client))
}

async fn translate<T: Transport + 'static>(
    State(client): State<Arc<Shipi18nClient<T>>>,
    body: Bytes,
) -> ProxyResponse {
    tokio::task::spawn_blocking(move || handle_translate(&client, &body))
        .await
        .unwrap_or_else(|e| {
            error!("Translation task failed: {e}");
            ProxyResponse::error(StatusCode::INTERNAL_SERVER_ERROR, TRANSLATION_FAILED)
        })
}

async fn health() -> &'static str {
    "OK"
}
