//! Message catalog with dotted keys, `{var}` interpolation and English fallback.
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    pub rtl: bool,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "fa",
        name: "فارسی",
        rtl: true,
    },
    LocaleMeta {
        code: "en",
        name: "English",
        rtl: false,
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("fa", include_str!("../i18n/fa.json")),
    ("en", include_str!("../i18n/en.json")),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported locales with their native names and direction metadata.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

fn locale_source(lang: &str) -> Option<&'static str> {
    LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

/// A loaded translation bundle.
#[derive(Debug, Clone)]
pub struct Catalog {
    lang: String,
    rtl: bool,
    translations: Value,
    fallback: Value,
}

impl Catalog {
    /// Load one of the embedded locales.
    ///
    /// # Errors
    ///
    /// Returns an error when `lang` is not embedded or its JSON is malformed.
    pub fn for_lang(lang: &str) -> Result<Self, CatalogError> {
        let source =
            locale_source(lang).ok_or_else(|| CatalogError::UnknownLocale(lang.to_string()))?;
        Self::from_json(lang, source)
    }

    /// Build a catalog from arbitrary JSON, falling back to embedded English.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json(lang: &str, json: &str) -> Result<Self, CatalogError> {
        let translations: Value = serde_json::from_str(json)?;
        let fallback = locale_source("en")
            .and_then(|src| serde_json::from_str(src).ok())
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        Ok(Self {
            lang: lang.to_string(),
            rtl: LOCALE_META.iter().any(|m| m.code == lang && m.rtl),
            translations,
            fallback,
        })
    }

    /// The site default (Persian), or an empty English catalog if that fails.
    #[must_use]
    pub fn default_catalog() -> Self {
        Self::for_lang("fa").unwrap_or_else(|_| Self {
            lang: "en".to_string(),
            rtl: false,
            translations: Value::Object(serde_json::Map::new()),
            fallback: Value::Object(serde_json::Map::new()),
        })
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// Translate a key without substitutions; unknown keys echo back.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.tr(key, None)
    }

    /// Translate a key, replacing `{name}` placeholders from `args`.
    #[must_use]
    pub fn tr(&self, key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
        get_nested_value(&self.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&self.fallback, key).and_then(|v| render_value(v, args)))
            .unwrap_or_else(|| key.to_string())
    }

    /// Shorthand for a single substitution.
    #[must_use]
    pub fn tr1(&self, key: &str, name: &str, value: &str) -> String {
        let mut args = BTreeMap::new();
        args.insert(name, value);
        self.tr(key, Some(&args))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
