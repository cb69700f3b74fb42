//! Recording transport for unit tests

use std::sync::Mutex;

use serde_json::Value;

use crate::{
    api::{HttpRequest, HttpResponse, Transport},
    error::{Error, Result},
};

#[derive(Debug)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

/// Answers every request with the same reply and remembers what it was sent
#[derive(Debug)]
pub(crate) struct MockTransport {
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn json(status: u16, body: Value) -> Self {
        Self::text(status, &body.to_string())
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Respond(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Body of the last request, parsed
    pub(crate) fn last_body(&self) -> Value {
        let request = self.last_request().expect("no request was sent");
        serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(Error::Transport(message.clone())),
        }
    }
}
