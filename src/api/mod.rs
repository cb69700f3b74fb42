//! Authenticated calls to the Shipi18n API

use log::{debug, warn};
use serde_json::Value;

use crate::{
    config::ConfigSource,
    error::{Error, MISSING_API_KEY, Result},
};

mod transport;
pub mod types;

pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Method, extra headers and body of a single API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Method, Default: POST
    pub method: Method,
    /// Extra headers, merged over the defaults
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Option<String>,
}

impl RequestOptions {
    /// `GET` without a body
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            ..Default::default()
        }
    }

    /// `POST` with a JSON body
    pub fn post(body: String) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Default::default()
        }
    }

    /// Add a header, replacing an earlier one with the same name
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }
}

/// Resolves the configuration and sends authenticated requests over a [`Transport`]
#[derive(Debug, Clone)]
pub struct ApiGateway<T> {
    source: ConfigSource,
    transport: T,
}

impl<T: Transport> ApiGateway<T> {
    /// Gateway reading its configuration from `source`
    pub fn new(source: ConfigSource, transport: T) -> Self {
        Self { source, transport }
    }

    /// Where the configuration comes from
    pub fn config_source(&self) -> &ConfigSource {
        &self.source
    }

    /// Replace the configuration source
    pub fn set_config_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// The transport requests go through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `/api{endpoint}` and return the parsed JSON body.
    ///
    /// Fails without touching the network when no API key is configured.
    pub fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let config = self.source.resolve();
        let Some(api_key) = config.key() else {
            return Err(Error::Configuration(MISSING_API_KEY.to_string()));
        };

        let url = format!("{}/api{}", config.api_url.trim_end_matches('/'), endpoint);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in options.headers {
            if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                continue;
            }
            set_header(&mut headers, name, value);
        }
        headers.push((API_KEY_HEADER.to_string(), api_key.to_string()));

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };

        debug!("{:?} {}", request.method, request.url);
        let response = self.transport.send(&request)?;

        if !response.is_success() {
            let message = error_message(&response);
            warn!("{} returned {}: {message}", request.url, response.status);
            return Err(Error::Api {
                status: response.status,
                message,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| Error::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    if let Some(existing) = headers
        .iter_mut()
        .find(|(key, _)| key.eq_ignore_ascii_case(&name))
    {
        *existing = (name, value);
    } else {
        headers.push((name, value));
    }
}

/// `message` of a JSON error body, or `API error: <status>`
fn error_message(response: &HttpResponse) -> String {
    let body: Value = serde_json::from_str(&response.body).unwrap_or_default();

    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("API error: {}", response.status))
}
