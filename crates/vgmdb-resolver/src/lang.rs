//! Language-priority selection over VGMdb's localized name maps.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Default value of the `lang-priority` setting.
pub const DEFAULT_LANG_PRIORITY: &str = "ja, en, ja-latn, Japanese, Romaji, English";

/// Language tag -> text map that keeps the order the catalog sent.
///
/// The "first entry" fallback depends on that order, so this is a list of
/// pairs rather than a hash map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalizedNames(Vec<(String, String)>);

impl LocalizedNames {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(lang, value)| (lang.into(), value.into()))
                .collect(),
        )
    }

    /// Value stored under `lang`; the first one wins on duplicate tags.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(tag, _)| tag == lang)
            .map(|(_, value)| value.as_str())
    }

    /// First entry in catalog order.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for LocalizedNames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = LocalizedNames;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language tag to name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((lang, value)) = map.next_entry::<String, String>()? {
                    entries.push((lang, value));
                }
                Ok(LocalizedNames(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LocalizedNames::default())
            }
        }

        deserializer.deserialize_any(NamesVisitor)
    }
}

/// Ordered language preference used to pick one value out of [`LocalizedNames`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguagePriority(Vec<String>);

impl LanguagePriority {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated list such as `"ja, en, ja-latn"`.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// Value for the first priority tag present in `names`.
    pub fn pick<'a>(&self, names: &'a LocalizedNames) -> Option<&'a str> {
        self.0.iter().find_map(|lang| names.get(lang))
    }

    /// Like [`pick`](Self::pick), but falls back to `fallback` when no tag matches.
    pub fn resolve_or<'a>(&self, names: &'a LocalizedNames, fallback: &'a str) -> &'a str {
        self.pick(names).unwrap_or(fallback)
    }
}

impl Default for LanguagePriority {
    fn default() -> Self {
        Self::parse(DEFAULT_LANG_PRIORITY)
    }
}
