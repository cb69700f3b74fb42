//! CLDR plural variants in translated JSON
//!
//! With pluralization enabled the API adds siblings named `<key>_<category>`,
//! eg: `items` gains `items_one`, `items_few` and `items_other` for Polish.

use std::{collections::BTreeMap, fmt};

use serde_json::{Map, Value};

/// Grammatical number buckets defined by CLDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`
    Other,
}

impl PluralCategory {
    /// Every category, in CLDR order
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    /// Suffix used in keys
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Category named by `suffix`
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == suffix)
    }

    /// `<base>_<category>`
    pub fn key_for(&self, base: &str) -> String {
        format!("{base}_{}", self.as_str())
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `items_few` into `("items", Few)`, `None` for keys without a plural suffix
pub fn split_plural_key(key: &str) -> Option<(&str, PluralCategory)> {
    let (base, suffix) = key.rsplit_once('_')?;
    if base.is_empty() {
        return None;
    }
    Some((base, PluralCategory::from_suffix(suffix)?))
}

/// String variants of `base` found among the keys of `object`
pub fn plural_forms<'a>(
    object: &'a Map<String, Value>,
    base: &str,
) -> BTreeMap<PluralCategory, &'a str> {
    object
        .iter()
        .filter_map(|(key, value)| {
            let (key_base, category) = split_plural_key(key)?;
            if key_base != base {
                return None;
            }
            Some((category, value.as_str()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn splits_plural_suffixes() {
        assert_eq!(
            split_plural_key("cart.items_few"),
            Some(("cart.items", PluralCategory::Few))
        );
        assert_eq!(
            split_plural_key("user_name_other"),
            Some(("user_name", PluralCategory::Other))
        );
        assert_eq!(split_plural_key("user_name"), None);
        assert_eq!(split_plural_key("_one"), None);
        assert_eq!(split_plural_key("items"), None);
    }

    #[test]
    fn collects_variants_of_one_key() {
        let translated = json!({
            "items": "{count} przedmiotów",
            "items_one": "{count} przedmiot",
            "items_few": "{count} przedmioty",
            "items_many": "{count} przedmiotów",
            "title_one": "Tytuł"
        });

        let forms = plural_forms(translated.as_object().unwrap(), "items");

        assert_eq!(
            forms.keys().copied().collect::<Vec<_>>(),
            vec![
                PluralCategory::One,
                PluralCategory::Few,
                PluralCategory::Many
            ]
        );
        assert_eq!(forms[&PluralCategory::One], "{count} przedmiot");
    }

    #[test]
    fn key_for_round_trips() {
        for category in PluralCategory::ALL {
            let key = category.key_for("items");
            assert_eq!(split_plural_key(&key), Some(("items", category)));
        }
    }
}
