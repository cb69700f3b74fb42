//! Request and response bodies of the translation endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::TranslateOptions,
    error::{Error, Result},
    utils::plural::{self, PluralCategory},
};

/// Shape the API should answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A list of original/translated pairs per language
    Plain,
    /// The input JSON structure with its values translated
    Json,
}

/// Body posted to `/api/translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    ///Text, or serialized JSON in json mode
    pub text: String,
    ///Language of `text`
    pub source_language: String,
    ///Languages to translate into
    pub target_languages: Vec<String>,
    ///Keep placeholders untouched
    pub preserve_placeholders: bool,
    ///Generate plural variants
    pub enable_pluralization: bool,
    ///Omitted for plain translations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl TranslationRequest {
    /// Request for `text` using `options`
    pub fn new(
        text: String,
        options: &TranslateOptions,
        output_format: Option<OutputFormat>,
    ) -> Self {
        Self {
            text,
            source_language: options.source_language.clone(),
            target_languages: options.target_languages.clone(),
            preserve_placeholders: options.preserve_placeholders,
            enable_pluralization: options.enable_pluralization,
            output_format,
        }
    }
}

/// One translated segment of a plain translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationPair {
    ///Source segment
    pub original: String,
    ///Translated segment
    pub translated: String,
    /// Any other field the API attaches to the segment
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of one language in a plain translation
///
/// The API reports per language failures in place of the segment list, those are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageResult {
    /// Translated segments
    Pairs(Vec<TranslationPair>),
    /// Anything else, eg: `{"error": "unsupported language"}`
    Other(Value),
}

impl LanguageResult {
    /// Segments, `None` when the language did not translate into pairs
    pub fn pairs(&self) -> Option<&[TranslationPair]> {
        match self {
            LanguageResult::Pairs(pairs) => Some(pairs.as_slice()),
            LanguageResult::Other(_) => None,
        }
    }
}

/// Result of a plain translation
///
/// Serializes back into the flat object the API returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TranslationResult {
    /// Entry per requested language
    #[serde(flatten)]
    pub translations: BTreeMap<String, LanguageResult>,
    /// Top level keys that are not a requested language, e.g. warnings
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranslationResult {
    /// Split a `/translate` response into per language entries and everything else
    pub fn from_response(body: Value, targets: &[String]) -> Result<Self> {
        let mut result = Self::default();

        for (key, value) in response_object(body)? {
            if targets.contains(&key) {
                let entry = serde_json::from_value(value).map_err(decode_error)?;
                result.translations.insert(key, entry);
            } else {
                result.extra.insert(key, value);
            }
        }

        Ok(result)
    }

    /// Segments for `lang`
    pub fn get(&self, lang: &str) -> Option<&[TranslationPair]> {
        self.translations.get(lang).and_then(LanguageResult::pairs)
    }

    /// Requested languages the API answered with something other than segments
    pub fn failed_languages(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.translations
            .iter()
            .filter_map(|(lang, entry)| match entry {
                LanguageResult::Other(value) => Some((lang.as_str(), value)),
                LanguageResult::Pairs(_) => None,
            })
    }

    /// Translated text of every segment for `lang`, in order
    pub fn translated_texts(&self, lang: &str) -> Vec<&str> {
        self.get(lang)
            .unwrap_or_default()
            .iter()
            .map(|pair| pair.translated.as_str())
            .collect()
    }
}

/// Result of a JSON translation
///
/// Plural variants appear as extra `<key>_<category>` siblings, see [`crate::utils::plural`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JsonTranslationResult {
    /// Translated structure per requested language
    #[serde(flatten)]
    pub translations: BTreeMap<String, Value>,
    /// Top level keys that are not a requested language
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonTranslationResult {
    /// Split a `/translate` JSON mode response into per language values and everything else
    pub fn from_response(body: Value, targets: &[String]) -> Result<Self> {
        let mut result = Self::default();

        for (key, value) in response_object(body)? {
            if targets.contains(&key) {
                result.translations.insert(key, value);
            } else {
                result.extra.insert(key, value);
            }
        }

        Ok(result)
    }

    /// Translated structure for `lang`
    pub fn get(&self, lang: &str) -> Option<&Value> {
        self.translations.get(lang)
    }

    /// Plural variants of the top level `key` for `lang`
    pub fn plural_forms(&self, lang: &str, key: &str) -> BTreeMap<PluralCategory, &str> {
        top_level_plural_forms(self.get(lang), key)
    }

    /// Keep only `targets`, dropping everything else the API returned.
    ///
    /// Languages missing from the response are left out.
    pub fn into_locale_file(self, targets: &[String]) -> LocaleFileResult {
        let mut translations = self.translations;
        let projected = targets
            .iter()
            .filter_map(|lang| translations.remove_entry(lang))
            .collect();

        LocaleFileResult(projected)
    }
}

/// Translated locale content, exactly one entry per language the API returned
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleFileResult(pub BTreeMap<String, Value>);

impl LocaleFileResult {
    /// Translated content for `lang`
    pub fn get(&self, lang: &str) -> Option<&Value> {
        self.0.get(lang)
    }

    /// Plural variants of the top level `key` for `lang`
    pub fn plural_forms(&self, lang: &str, key: &str) -> BTreeMap<PluralCategory, &str> {
        top_level_plural_forms(self.get(lang), key)
    }

    /// Languages present
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No language was returned
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Language and content pairs, ordered by language
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The underlying map
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

/// Body of `/api/health`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    ///Reported state, usually `ok`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Everything else the endpoint reports
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl HealthStatus {
    /// `status` reads `ok` or `healthy`
    pub fn is_healthy(&self) -> bool {
        matches!(
            self.status.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("ok" | "healthy")
        )
    }
}

/// Content handed to the JSON translation
#[derive(Debug, Clone, PartialEq)]
pub enum JsonInput {
    /// Already serialized JSON, sent as is
    Text(String),
    /// Structured content, serialized before sending
    Value(Value),
}

impl JsonInput {
    /// Convert any serializable value
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(JsonInput::Value)
            .map_err(Error::Serialization)
    }

    /// Compact JSON text
    pub fn into_text(self) -> Result<String> {
        match self {
            JsonInput::Text(text) => Ok(text),
            JsonInput::Value(value) => serde_json::to_string(&value).map_err(Error::Serialization),
        }
    }
}

impl From<String> for JsonInput {
    fn from(text: String) -> Self {
        JsonInput::Text(text)
    }
}

impl From<&str> for JsonInput {
    fn from(text: &str) -> Self {
        JsonInput::Text(text.to_string())
    }
}

impl From<Value> for JsonInput {
    fn from(value: Value) -> Self {
        JsonInput::Value(value)
    }
}

fn top_level_plural_forms<'a>(
    content: Option<&'a Value>,
    key: &str,
) -> BTreeMap<PluralCategory, &'a str> {
    content
        .and_then(Value::as_object)
        .map(|object| plural::plural_forms(object, key))
        .unwrap_or_default()
}

fn response_object(body: Value) -> Result<Map<String, Value>> {
    serde_json::from_value(body).map_err(decode_error)
}

fn decode_error(source: serde_json::Error) -> Error {
    Error::Decode {
        endpoint: crate::TRANSLATE_ENDPOINT.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn request_omits_unset_output_format() {
        let opts = TranslateOptions::new().add_target_lang("es").build();
        let body = serde_json::to_value(TranslationRequest::new("Hi".into(), &opts, None)).unwrap();

        assert_eq!(
            body,
            json!({
                "text": "Hi",
                "sourceLanguage": "en",
                "targetLanguages": ["es"],
                "preservePlaceholders": true,
                "enablePluralization": true
            })
        );
    }

    #[test]
    fn plain_result_separates_languages_from_diagnostics() {
        let body = json!({
            "es": [{"original": "Hello", "translated": "Hola"}],
            "warnings": ["slow"]
        });

        let result = TranslationResult::from_response(body.clone(), &langs(&["es"])).unwrap();

        assert_eq!(result.translated_texts("es"), vec!["Hola"]);
        assert_eq!(result.extra.get("warnings"), Some(&json!(["slow"])));
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[test]
    fn plain_result_keeps_per_language_failures() {
        let body = json!({
            "es": [{"original": "Hi", "translated": "Hola"}],
            "fr": {"error": "unsupported language"},
            "de": [{"original": "Hi", "translated": null}]
        });

        let result =
            TranslationResult::from_response(body.clone(), &langs(&["es", "fr", "de"])).unwrap();

        assert_eq!(result.translated_texts("es"), vec!["Hola"]);
        assert_eq!(result.get("fr"), None);
        assert_eq!(
            result.failed_languages().map(|(lang, _)| lang).collect::<Vec<_>>(),
            vec!["de", "fr"]
        );
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[test]
    fn non_object_response_is_rejected() {
        let err = JsonTranslationResult::from_response(json!([1, 2]), &langs(&["es"])).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn locale_projection_drops_extras_and_missing_languages() {
        let body = json!({
            "es": {"t": "x-es"},
            "de": {"t": "x-de"},
            "namespaceInfo": {"count": 1}
        });
        let targets = langs(&["es", "fr"]);

        let projected = JsonTranslationResult::from_response(body, &targets)
            .unwrap()
            .into_locale_file(&targets);

        assert_eq!(projected.languages().collect::<Vec<_>>(), vec!["es"]);
        assert_eq!(projected.get("fr"), None);
        assert_eq!(serde_json::to_value(&projected).unwrap(), json!({"es": {"t": "x-es"}}));
    }

    #[test]
    fn json_input_serializes_compactly() {
        let text = JsonInput::from(json!({"a": 1})).into_text().unwrap();
        assert_eq!(text, r#"{"a":1}"#);

        let passthrough = JsonInput::from(r#"{ "a" : 1 }"#).into_text().unwrap();
        assert_eq!(passthrough, r#"{ "a" : 1 }"#);
    }

    #[test]
    fn unserializable_content_is_a_serialization_error() {
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "tuple keys are not valid JSON object keys");

        let err = JsonInput::from_serializable(&bad).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn health_status_keeps_details() {
        let health: HealthStatus =
            serde_json::from_value(json!({"status": "OK", "version": "2.1"})).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.details.get("version"), Some(&json!("2.1")));
    }
}
