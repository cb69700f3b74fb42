//!
//! _Errors_
//!
//! Every failure a client call or the proxy can run into.
//!

use std::io;

use thiserror::Error;

/// Message used when no API key could be resolved
pub const MISSING_API_KEY: &str = "API key is not set";
/// Message used when the text to translate is empty
pub const TEXT_REQUIRED: &str = "Text is required";
/// Message used when no target language was given
pub const TARGET_LANGUAGE_REQUIRED: &str = "At least one target language is required";

/// Errors returned by the client, the gateway and the locale file helpers
#[derive(Error, Debug)]
pub enum Error {
    /// No usable configuration, raised before any network call
    #[error("{0}")]
    Configuration(String),

    /// Input rejected locally, raised before any network call
    #[error("{0}")]
    Validation(String),

    /// The API answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// `message` field of the error body, or `API error: <status>`
        message: String,
    },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The API answered with a body that does not match the endpoint's shape
    #[error("unexpected response from `{endpoint}`: {source}")]
    Decode {
        /// Endpoint that produced the body
        endpoint: String,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Content given for JSON translation could not be turned into JSON
    #[error("could not serialize content as JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Reading or writing a locale file failed
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A locale file has an unknown extension or malformed content
    #[error("{0}")]
    LocaleFormat(String),
}

impl Error {
    /// Whether the error was raised by local input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
