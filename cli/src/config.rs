//! Configuration loaded once per invocation from the environment.
//!
//! A `.env` file in the working directory is read first when present.

use discsort::discogs::DEFAULT_PAGE_SIZE;
use discsort::LibraryRoots;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Discogs personal access token (`DISCOGS_TOKEN`)
    pub discogs_token: String,
    /// Discogs API base URL (default: "https://api.discogs.com")
    pub discogs_base_url: Option<String>,
    /// User-Agent sent to Discogs (default: "discsort/<version>")
    pub discogs_user_agent: Option<String>,
    /// Search results requested per query (default: 50)
    pub discogs_page_size: u32,
    pub roots: LibraryRoots,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let discogs_page_size = match optional("DISCOGS_PAGE_SIZE") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "DISCOGS_PAGE_SIZE",
                value,
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            discogs_token: required("DISCOGS_TOKEN")?,
            discogs_base_url: optional("DISCOGS_BASE_URL"),
            discogs_user_agent: optional("DISCOGS_USER_AGENT"),
            discogs_page_size,
            roots: LibraryRoots {
                destination: PathBuf::from(required("DISCSORT_DESTINATION_ROOT")?),
                duplicates: PathBuf::from(required("DISCSORT_DUPLICATES_ROOT")?),
                review: PathBuf::from(required("DISCSORT_REVIEW_ROOT")?),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DISCOGS_TOKEN", "abc"),
        ("DISCSORT_DESTINATION_ROOT", "/music/sorted"),
        ("DISCSORT_DUPLICATES_ROOT", "/music/duplicates"),
        ("DISCSORT_REVIEW_ROOT", "/music/review"),
    ];

    #[test]
    fn test_loads_required_values_with_defaults() {
        let config = AppConfig::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(config.discogs_token, "abc");
        assert_eq!(config.discogs_base_url, None);
        assert_eq!(config.discogs_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.roots.destination, PathBuf::from("/music/sorted"));
        assert_eq!(config.roots.duplicates, PathBuf::from("/music/duplicates"));
        assert_eq!(config.roots.review, PathBuf::from("/music/review"));
    }

    #[test]
    fn test_missing_token_is_reported() {
        let vars: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "DISCOGS_TOKEN")
            .collect();
        assert_eq!(
            AppConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Missing("DISCOGS_TOKEN"))
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = BASE.to_vec();
        // later entries win in the lookup map
        vars.push(("DISCSORT_REVIEW_ROOT", "  "));
        assert_eq!(
            AppConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Missing("DISCSORT_REVIEW_ROOT"))
        );
    }

    #[test]
    fn test_invalid_page_size() {
        let mut vars = BASE.to_vec();
        vars.push(("DISCOGS_PAGE_SIZE", "lots"));
        assert_eq!(
            AppConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid {
                name: "DISCOGS_PAGE_SIZE",
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_optional_overrides() {
        let mut vars = BASE.to_vec();
        vars.push(("DISCOGS_BASE_URL", "http://localhost:9000"));
        vars.push(("DISCOGS_PAGE_SIZE", "10"));
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.discogs_base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.discogs_page_size, 10);
    }
}
