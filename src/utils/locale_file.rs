//! Reading and writing locale files on disk

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;
use serde_json::Value;

use crate::{
    api::types::LocaleFileResult,
    error::{Error, Result},
};

/// Formats a locale file can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleFormat {
    /// `.json`
    #[default]
    Json,
    /// `.yml` / `.yaml`
    Yaml,
    /// `.toml`
    Toml,
}

impl LocaleFormat {
    /// Format matching the extension of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default();

        match ext {
            "json" => Ok(LocaleFormat::Json),
            "yml" | "yaml" => Ok(LocaleFormat::Yaml),
            "toml" => Ok(LocaleFormat::Toml),
            _ => Err(Error::LocaleFormat(format!(
                "unsupported locale file `{}`",
                path.display()
            ))),
        }
    }

    /// Extension used when writing
    pub fn extension(&self) -> &'static str {
        match self {
            LocaleFormat::Json => "json",
            LocaleFormat::Yaml => "yml",
            LocaleFormat::Toml => "toml",
        }
    }

    /// Parse file content into JSON
    pub fn parse(&self, content: &str) -> Result<Value> {
        let parsed: std::result::Result<Value, String> = match self {
            LocaleFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            LocaleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            LocaleFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(Error::LocaleFormat)
    }

    /// Write `value` in this format
    pub fn write<W: Write>(&self, mut writer: W, value: &Value) -> Result<()> {
        let written: std::result::Result<(), String> = match self {
            LocaleFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, value).map_err(|e| e.to_string())
            }
            LocaleFormat::Yaml => {
                serde_yaml::to_writer(&mut writer, value).map_err(|e| e.to_string())
            }
            LocaleFormat::Toml => toml::to_string_pretty(value)
                .map_err(|e| e.to_string())
                .and_then(|text| writer.write_all(text.as_bytes()).map_err(|e| e.to_string())),
        };
        written.map_err(Error::LocaleFormat)?;

        writer.flush()?;
        Ok(())
    }
}

/// Load a locale file, returning its format and content
pub fn read_locale_file(path: &Path) -> Result<(LocaleFormat, Value)> {
    let format = LocaleFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    Ok((format, format.parse(&content)?))
}

/// Write one `<lang>.<ext>` file per translated language into `dir`
pub fn write_locale_files(
    dir: &Path,
    result: &LocaleFileResult,
    format: LocaleFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(result.len());
    for (lang, content) in result.iter() {
        if lang.is_empty() || lang.contains(['/', '\\']) || lang.starts_with('.') {
            return Err(Error::LocaleFormat(format!(
                "`{lang}` cannot be used as a file name"
            )));
        }

        let file_path = dir.join(format!("{lang}.{}", format.extension()));
        let writer = BufWriter::new(File::create(&file_path)?);
        format.write(writer, content)?;

        info!("Wrote {}", file_path.display());
        written.push(file_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shipi18n-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn result(entries: &[(&str, Value)]) -> LocaleFileResult {
        LocaleFileResult(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            LocaleFormat::from_path(Path::new("locales/en.yaml")).unwrap(),
            LocaleFormat::Yaml
        );
        assert_eq!(
            LocaleFormat::from_path(Path::new("en.toml")).unwrap(),
            LocaleFormat::Toml
        );
        assert!(matches!(
            LocaleFormat::from_path(Path::new("en.po")),
            Err(Error::LocaleFormat(_))
        ));
    }

    #[test]
    fn reads_yaml_and_toml_as_json() {
        let dir = scratch_dir("read");
        fs::write(dir.join("en.yml"), "greeting: Hello\nnav:\n  home: Home\n").unwrap();
        fs::write(dir.join("en.toml"), "greeting = \"Hello\"\n").unwrap();

        let (format, yaml) = read_locale_file(&dir.join("en.yml")).unwrap();
        assert_eq!(format, LocaleFormat::Yaml);
        assert_eq!(yaml, json!({"greeting": "Hello", "nav": {"home": "Home"}}));

        let (_, toml) = read_locale_file(&dir.join("en.toml")).unwrap();
        assert_eq!(toml, json!({"greeting": "Hello"}));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn writes_one_file_per_language() {
        let dir = scratch_dir("write");
        let translated = result(&[
            ("es", json!({"greeting": "Hola"})),
            ("fr", json!({"greeting": "Bonjour"})),
        ]);

        let written = write_locale_files(&dir, &translated, LocaleFormat::Json).unwrap();

        assert_eq!(written, vec![dir.join("es.json"), dir.join("fr.json")]);
        let (_, es) = read_locale_file(&dir.join("es.json")).unwrap();
        assert_eq!(es, json!({"greeting": "Hola"}));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_language_codes_that_escape_the_directory() {
        let dir = scratch_dir("escape");
        let translated = result(&[("../es", json!({}))]);

        let err = write_locale_files(&dir, &translated, LocaleFormat::Yaml).unwrap_err();

        assert!(matches!(err, Error::LocaleFormat(_)));
        fs::remove_dir_all(&dir).unwrap();
    }
}
