#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # shipi18n
//!
//! The `shipi18n` crate is a client for the [Shipi18n](<https://shipi18n.com>) translation API,
//! plus a proxy endpoint so browser code can use the API without ever holding the key.
//!
//! Translation, plural generation and placeholder preservation all happen inside the API.
//! This crate resolves credentials, validates input, shapes requests and turns failures into
//! a single [`Error`] type.
//!
//!## Features
//! - Plain text translation into many languages at once.
//! - JSON translation that keeps the structure of the document.
//! - Locale file translation, reading and writing `json`, `yaml` and `toml` files.
//! - A ready to mount `axum` router for `POST /api/translate`.
//!
//! # Usage
//!
//! The crate uses env variables to set the api key.
//!
//! Create a `.env` file in the root of your project and add the following keys:
//!
//!- **SHIPI18N_API_KEY = "xyz"** read by trusted (server side) code
//!- **SHIPI18N_API_URL = "https://..."** optional
//!- **PUBLIC_SHIPI18N_API_KEY / PUBLIC_SHIPI18N_API_URL** the only values untrusted code reads.
//!  Keep the real key out of these, browsers should go through the proxy.
//!
//! ```rust,no_run
//!use shipi18n::{
//!    Shipi18nClient,
//!    config::{Configuration, TranslateOptions},
//!};
//!use serde_json::json;
//!
//!fn main() -> shipi18n::Result<()> {
//!    let cfg = Configuration::new()
//!        .api_key("xyz")
//!        .build();
//!    let client = Shipi18nClient::new(cfg);
//!
//!    let opts = TranslateOptions::new()
//!        .source_lang("en")
//!        .add_target_lang("fr")
//!        .add_target_lang("pl")
//!        .build();
//!
//!    let locales = client.translate_locale_file(json!({"items": "{count} items"}), &opts)?;
//!    println!("{}", serde_json::to_string_pretty(&locales).unwrap());
//!    Ok(())
//!}
//! ```
//!
//! ## Language codes need to be in [ISO-639](<https://wikipedia.org/wiki/ISO_639>) format
//!

pub mod api;
mod client;
pub mod config;
pub mod error;
pub mod proxy;
pub mod utils;

#[cfg(test)]
mod testing;

pub use api::types::{
    HealthStatus, JsonInput, JsonTranslationResult, LanguageResult, LocaleFileResult, OutputFormat,
    TranslationPair, TranslationRequest, TranslationResult,
};
pub use client::Shipi18nClient;
pub use error::{Error, Result};

/// Endpoint translations are posted to, relative to `/api`
pub const TRANSLATE_ENDPOINT: &str = "/translate";
/// Endpoint reporting API health, relative to `/api`
pub const HEALTH_ENDPOINT: &str = "/health";
