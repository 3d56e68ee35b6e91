//! Configuration loading and parsing.
//!
//! Defines the TOML schema and resolves it into immutable resolver settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::lang::LanguagePriority;
use crate::record::NormalizeOptions;

/// Resolver configuration loaded from TOML. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ResolverConfig {
    /// Distance weight added for VGMdb candidates (default: 0.0).
    pub source_weight: Option<f64>,
    /// Comma-separated language preference, most preferred first.
    #[serde(rename = "lang-priority")]
    pub lang_priority: Option<String>,
    /// Prefer performer credits over composers for the album artist (default: true).
    pub prefer_performers: Option<bool>,
    /// Catalog API base URL (defaults to https://vgmdb.info).
    pub base_url: Option<String>,
    /// User-Agent sent with catalog requests.
    pub user_agent: Option<String>,
}

/// Settings injected into the resolver; never mutated after construction.
#[derive(Clone, Debug)]
pub struct ResolverSettings {
    pub source_weight: f64,
    pub normalize: NormalizeOptions,
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            source_weight: 0.0,
            normalize: NormalizeOptions::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg = toml::from_str::<ResolverConfig>(&raw)
            .with_context(|| format!("parse config {:?}", path))?;
        Ok(cfg)
    }

    /// Resolve optional keys against the defaults.
    pub fn into_settings(self) -> Result<ResolverSettings> {
        let defaults = ResolverSettings::default();
        let languages = match self.lang_priority.as_deref() {
            Some(raw) => {
                let parsed = LanguagePriority::parse(raw);
                if parsed.tags().is_empty() {
                    anyhow::bail!("lang-priority must list at least one language");
                }
                parsed
            }
            None => defaults.normalize.languages,
        };
        let source_weight = self.source_weight.unwrap_or(defaults.source_weight);
        if !source_weight.is_finite() {
            anyhow::bail!("source_weight must be a finite number");
        }
        let base_url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let user_agent = self
            .user_agent
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Ok(ResolverSettings {
            source_weight,
            normalize: NormalizeOptions {
                languages,
                prefer_performers: self
                    .prefer_performers
                    .unwrap_or(defaults.normalize.prefer_performers),
            },
            base_url,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = ResolverConfig::default().into_settings().unwrap();
        assert_eq!(settings.source_weight, 0.0);
        assert_eq!(
            settings.normalize.languages.tags(),
            ["ja", "en", "ja-latn", "Japanese", "Romaji", "English"]
        );
        assert!(settings.normalize.prefer_performers);
        assert_eq!(settings.base_url, "https://vgmdb.info");
    }

    #[test]
    fn parses_toml_keys() {
        let cfg: ResolverConfig = toml::from_str(
            r#"
source_weight = 0.5
lang-priority = "en, ja-latn"
prefer_performers = false
base_url = "http://localhost:8080/"
"#,
        )
        .unwrap();
        let settings = cfg.into_settings().unwrap();
        assert_eq!(settings.source_weight, 0.5);
        assert_eq!(settings.normalize.languages.tags(), ["en", "ja-latn"]);
        assert!(!settings.normalize.prefer_performers);
        assert_eq!(settings.base_url, "http://localhost:8080");
    }

    #[test]
    fn blank_lang_priority_is_rejected() {
        let cfg = ResolverConfig {
            lang_priority: Some(" , ".to_string()),
            ..ResolverConfig::default()
        };
        assert!(cfg.into_settings().is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source_weight = 0.25\n").unwrap();
        let cfg = ResolverConfig::load(&path).unwrap();
        assert_eq!(cfg.source_weight, Some(0.25));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source_weight = \"heavy\"\n").unwrap();
        let err = ResolverConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("parse config"), "{err:#}");
    }
}
