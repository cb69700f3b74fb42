//! The translation operations

use std::path::Path;

use log::{debug, info};

use crate::{
    HEALTH_ENDPOINT, TRANSLATE_ENDPOINT,
    api::{
        ApiGateway, RequestOptions, Transport, UreqTransport,
        types::{
            HealthStatus, JsonInput, JsonTranslationResult, LocaleFileResult, OutputFormat,
            TranslationRequest, TranslationResult,
        },
    },
    config::{ConfigSource, Configuration, ExecutionContext, TranslateOptions},
    error::{Error, Result, TARGET_LANGUAGE_REQUIRED, TEXT_REQUIRED},
    utils::locale_file::read_locale_file,
};

/// Client for the Shipi18n API
///
/// Every operation validates its input, then makes exactly one request. Nothing is retried.
///
/// Example:
/// ```rust,no_run
///use shipi18n::{Shipi18nClient, config::{ExecutionContext, TranslateOptions}};
///
///fn main() -> shipi18n::Result<()> {
///    let client = Shipi18nClient::from_env(ExecutionContext::Trusted);
///
///    let opts = TranslateOptions::new()
///        .add_target_langs(vec!["es", "fr"])
///        .build();
///
///    let result = client.translate("Hello {name}", &opts)?;
///    println!("{:?}", result.translated_texts("es"));
///    Ok(())
///}
/// ```
#[derive(Debug, Clone)]
pub struct Shipi18nClient<T = UreqTransport> {
    gateway: ApiGateway<T>,
}

impl Shipi18nClient<UreqTransport> {
    /// Client that always uses `config`
    pub fn new(config: Configuration) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client that reads the environment for `context` on every request
    pub fn from_env(context: ExecutionContext) -> Self {
        Self::with_transport(context, UreqTransport::new())
    }
}

impl<T: Transport> Shipi18nClient<T> {
    /// Client sending its requests over `transport`
    pub fn with_transport<S: Into<ConfigSource>>(source: S, transport: T) -> Self {
        Self {
            gateway: ApiGateway::new(source.into(), transport),
        }
    }

    /// The configuration the next request will use
    pub fn config(&self) -> Configuration {
        self.gateway.config_source().resolve()
    }

    /// Use `config` for every request, ignoring the environment
    pub fn override_config(&mut self, config: Configuration) {
        self.gateway.set_config_source(ConfigSource::Fixed(config));
    }

    /// Drop an override and read the environment for `context` again
    pub fn reset_config(&mut self, context: ExecutionContext) {
        self.gateway
            .set_config_source(ConfigSource::Environment(context));
    }

    /// The underlying gateway
    pub fn gateway(&self) -> &ApiGateway<T> {
        &self.gateway
    }

    /// Translate plain text into every target language.
    ///
    /// Fails with [`Error::Validation`] before any request when `text` or the targets are empty.
    pub fn translate(&self, text: &str, options: &TranslateOptions) -> Result<TranslationResult> {
        validate(text, options)?;

        let body = self.post_translation(text.to_string(), options, None)?;
        TranslationResult::from_response(body, &options.target_languages)
    }

    /// Translate the values of a JSON document, keeping its structure.
    ///
    /// Structured input is serialized compactly, text input is sent unchanged.
    pub fn translate_json<J: Into<JsonInput>>(
        &self,
        json: J,
        options: &TranslateOptions,
    ) -> Result<JsonTranslationResult> {
        let text = json.into().into_text()?;
        validate(&text, options)?;

        let body = self.post_translation(text, options, Some(OutputFormat::Json))?;
        JsonTranslationResult::from_response(body, &options.target_languages)
    }

    /// Translate locale file content and keep only the requested languages.
    ///
    /// Languages the API did not return are left out of the result rather than failing.
    pub fn translate_locale_file<J: Into<JsonInput>>(
        &self,
        content: J,
        options: &TranslateOptions,
    ) -> Result<LocaleFileResult> {
        let result = self.translate_json(content, options)?;
        let projected = result.into_locale_file(&options.target_languages);

        if projected.len() < options.target_languages.len() {
            info!(
                "API returned {} of {} requested languages",
                projected.len(),
                options.target_languages.len()
            );
        }

        Ok(projected)
    }

    /// Read a `.json`, `.yaml` or `.toml` locale file and translate it
    pub fn translate_locale_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &TranslateOptions,
    ) -> Result<LocaleFileResult> {
        let (_, content) = read_locale_file(path.as_ref())?;
        self.translate_locale_file(content, options)
    }

    /// Check that the API is reachable and the key is accepted
    pub fn health(&self) -> Result<HealthStatus> {
        let body = self.gateway.request(HEALTH_ENDPOINT, RequestOptions::get())?;
        serde_json::from_value(body).map_err(|source| Error::Decode {
            endpoint: HEALTH_ENDPOINT.to_string(),
            source,
        })
    }

    fn post_translation(
        &self,
        text: String,
        options: &TranslateOptions,
        output_format: Option<OutputFormat>,
    ) -> Result<serde_json::Value> {
        let request = TranslationRequest::new(text, options, output_format);
        let body = serde_json::to_string(&request).map_err(Error::Serialization)?;

        debug!(
            "Translating {} characters from {} into {:?}",
            request.text.len(),
            request.source_language,
            request.target_languages
        );

        self.gateway
            .request(TRANSLATE_ENDPOINT, RequestOptions::post(body))
    }
}

fn validate(text: &str, options: &TranslateOptions) -> Result<()> {
    if text.is_empty() {
        return Err(Error::Validation(TEXT_REQUIRED.to_string()));
    }
    if options.target_languages.is_empty() {
        return Err(Error::Validation(TARGET_LANGUAGE_REQUIRED.to_string()));
    }
    Ok(())
}
