//!
//! _Config builder_
//!
//! Resolves the API credentials and builds the options sent with each translation.
//!

use std::{
    env,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::{debug, warn};

/// Base URL used when none is configured
pub const DEFAULT_API_URL: &str = "https://api.shipi18n.com";

/// API key read by trusted (server side) code
pub const API_KEY_VAR: &str = "SHIPI18N_API_KEY";
/// API base url read by trusted (server side) code
pub const API_URL_VAR: &str = "SHIPI18N_API_URL";
/// API key readable by untrusted (browser side) code. Never put the real secret here.
pub const PUBLIC_API_KEY_VAR: &str = "PUBLIC_SHIPI18N_API_KEY";
/// API base url readable by untrusted (browser side) code
pub const PUBLIC_API_URL_VAR: &str = "PUBLIC_SHIPI18N_API_URL";

static DOTENV: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Load the `.env` file of the working directory into the process environment.
///
/// Only the first call reads the file, later calls return the same path.
/// Variables already set win over the file.
pub fn load_dotenv() -> Option<&'static Path> {
    DOTENV
        .get_or_init(|| {
            let path = dotenvy::dotenv().ok();
            if let Some(path) = &path {
                debug!("Loaded {}", path.display());
            }
            path
        })
        .as_deref()
}

/// Where the calling code runs, decided once by the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// Server side code that may hold secrets
    #[default]
    Trusted,
    /// Code shipped to a caller's browser, only sees `PUBLIC_` variables
    Untrusted,
}

impl ExecutionContext {
    /// Names of the (api key, api url) variables readable in this context
    pub fn env_vars(&self) -> (&'static str, &'static str) {
        match self {
            ExecutionContext::Trusted => (API_KEY_VAR, API_URL_VAR),
            ExecutionContext::Untrusted => (PUBLIC_API_KEY_VAR, PUBLIC_API_URL_VAR),
        }
    }
}

/// Credentials and base url of the translation API
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    ///Secret sent in the `X-API-Key` header
    pub api_key: Option<String>,
    ///Base url, `/api/<endpoint>` is appended to it
    pub api_url: String,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Configuration {
    /// Return the defaults: no key, default url
    pub fn new() -> Self {
        Self::default()
    }

    /// Key sent with every request
    pub fn api_key<S: Into<String>>(&mut self, key: S) -> &mut Self {
        self.api_key = Some(key.into());
        self
    }

    /// Base url of the API
    pub fn api_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.api_url = url.into();
        self
    }

    /// Build the configuration
    pub fn build(&self) -> Self {
        self.clone()
    }

    /// The key, if one is set and not empty
    pub fn key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Read the configuration for `context` from the process environment.
    ///
    /// The `.env` file is loaded on the first call, see [`load_dotenv`].
    pub fn from_env(context: ExecutionContext) -> Self {
        load_dotenv();
        Self::from_lookup(context, |name| env::var(name).ok())
    }

    /// Read the configuration for `context` through `lookup`
    pub fn from_lookup<F>(context: ExecutionContext, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (key_var, url_var) = context.env_vars();

        let api_key = lookup(key_var).filter(|k| !k.is_empty());
        let api_url = lookup(url_var)
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if context == ExecutionContext::Untrusted && api_key.is_some() {
            warn!(
                "{PUBLIC_API_KEY_VAR} is set, this value is exposed to browsers. Route requests through the proxy instead"
            );
        }

        Self { api_key, api_url }
    }
}

/// How a client obtains its configuration on every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Always use this value, ignoring the environment
    Fixed(Configuration),
    /// Read the environment for this context on each request
    Environment(ExecutionContext),
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::Environment(ExecutionContext::Trusted)
    }
}

impl ConfigSource {
    /// Current configuration
    pub fn resolve(&self) -> Configuration {
        match self {
            ConfigSource::Fixed(config) => config.clone(),
            ConfigSource::Environment(context) => Configuration::from_env(*context),
        }
    }
}

impl From<Configuration> for ConfigSource {
    fn from(config: Configuration) -> Self {
        ConfigSource::Fixed(config)
    }
}

impl From<ExecutionContext> for ConfigSource {
    fn from(context: ExecutionContext) -> Self {
        ConfigSource::Environment(context)
    }
}

/// Options sent along with the text of a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    ///Source language, Default: en
    pub source_language: String,
    ///Languages to translate into, must not be empty
    pub target_languages: Vec<String>,
    ///Keep `{name}` style tokens untouched, Default: true
    pub preserve_placeholders: bool,
    ///Generate CLDR plural variants, Default: true
    pub enable_pluralization: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            target_languages: Default::default(),
            preserve_placeholders: true,
            enable_pluralization: true,
        }
    }
}

impl TranslateOptions {
    /// Return the defaults for the options
    pub fn new() -> Self {
        Self::default()
    }

    /// Language to translate from
    pub fn source_lang<S: Into<String>>(&mut self, lang: S) -> &mut Self {
        self.source_language = lang.into();
        self
    }

    ///Language to translate to
    pub fn add_target_lang<S: Into<String>>(&mut self, lang: S) -> &mut Self {
        self.target_languages.push(lang.into());
        self
    }

    ///Languages to translate to -- add many
    pub fn add_target_langs<S: Into<String>>(&mut self, langs: Vec<S>) -> &mut Self {
        self.target_languages
            .extend(langs.into_iter().map(|s| s.into()));
        self
    }

    ///Preserve placeholders or not
    pub fn preserve_placeholders(&mut self, preserve: bool) -> &mut Self {
        self.preserve_placeholders = preserve;
        self
    }

    ///Generate plural forms or not
    pub fn enable_pluralization(&mut self, enable: bool) -> &mut Self {
        self.enable_pluralization = enable;
        self
    }

    /// Build the options
    pub fn build(&self) -> Self {
        self.clone()
    }
}
