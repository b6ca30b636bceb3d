//! Configuration and data directory management.
//!
//! Everything here is resolved once at startup and handed to the rest of
//! the workspace by reference. Only the `*_from_env` constructors look at
//! the process environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_VIM_URL: &str = "https://golf-d5bs.onrender.com/v1/solutions/analytics";
pub const DEFAULT_NEWS_URL: &str = "https://news-app-nmzn.onrender.com/api/analytics";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Paths to all Statbanner data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Dated snapshot records (`data/snapshots/`).
    pub snapshots: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            snapshots: root.join("snapshots"),
            root,
        };
        std::fs::create_dir_all(&paths.snapshots)?;
        Ok(paths)
    }
}

/// Where the two analytics sources are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEndpoints {
    pub vim_url: String,
    pub news_url: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            vim_url: DEFAULT_VIM_URL.into(),
            news_url: DEFAULT_NEWS_URL.into(),
        }
    }
}

/// OAuth 1.0a user-context credentials for the banner upload.
#[derive(Clone, PartialEq, Eq)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

impl TwitterCredentials {
    pub const CONSUMER_KEY_VAR: &'static str = "TW_CONSUMER_KEY";
    pub const CONSUMER_SECRET_VAR: &'static str = "TW_CONSUMER_SECRET";
    pub const ACCESS_TOKEN_VAR: &'static str = "TW_ACCESS_TOKEN";
    pub const ACCESS_SECRET_VAR: &'static str = "TW_ACCESS_SECRET";

    /// Read all four credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup. Missing or blank values
    /// are reported by variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
                _ => Err(Error::Config(format!("{} is not set", name))),
            }
        };

        Ok(Self {
            consumer_key: require(Self::CONSUMER_KEY_VAR)?,
            consumer_secret: require(Self::CONSUMER_SECRET_VAR)?,
            access_token: require(Self::ACCESS_TOKEN_VAR)?,
            access_secret: require(Self::ACCESS_SECRET_VAR)?,
        })
    }
}

/// Top-level Statbanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Analytics endpoints.
    pub endpoints: SourceEndpoints,
    /// Per-request timeout for metric fetches and the upload.
    pub http_timeout_secs: u64,
}

impl BannerConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(data_dir, |name| std::env::var(name).ok())
    }

    /// Same as [`BannerConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SourceEndpoints::default();
        let endpoints = SourceEndpoints {
            vim_url: lookup("STATBANNER_VIM_URL").unwrap_or(defaults.vim_url),
            news_url: lookup("STATBANNER_NEWS_URL").unwrap_or(defaults.news_url),
        };

        let http_timeout_secs = match lookup("STATBANNER_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::Config(format!("STATBANNER_HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        if http_timeout_secs == 0 {
            return Err(Error::Config(
                "STATBANNER_HTTP_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            data_paths,
            endpoints,
            http_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_complete() {
        let creds = TwitterCredentials::from_lookup(lookup_from(&[
            ("TW_CONSUMER_KEY", "ck"),
            ("TW_CONSUMER_SECRET", "cs"),
            ("TW_ACCESS_TOKEN", "at"),
            ("TW_ACCESS_SECRET", " as \n"),
        ]))
        .unwrap();
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.access_secret, "as");
    }

    #[test]
    fn test_credentials_missing_names_variable() {
        let err = TwitterCredentials::from_lookup(lookup_from(&[
            ("TW_CONSUMER_KEY", "ck"),
            ("TW_CONSUMER_SECRET", "cs"),
            ("TW_ACCESS_TOKEN", ""),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("TW_ACCESS_TOKEN"));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = TwitterCredentials {
            consumer_key: "ck".into(),
            consumer_secret: "super-secret".into(),
            access_token: "at".into(),
            access_secret: "also-secret".into(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("also-secret"));
        assert!(printed.contains("ck"));
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BannerConfig::from_lookup(dir.path(), lookup_from(&[])).unwrap();
        assert_eq!(config.endpoints, SourceEndpoints::default());
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert!(config.data_paths.snapshots.is_dir());
    }

    #[test]
    fn test_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config = BannerConfig::from_lookup(
            dir.path(),
            lookup_from(&[
                ("STATBANNER_VIM_URL", "http://localhost:1/vim"),
                ("STATBANNER_HTTP_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoints.vim_url, "http://localhost:1/vim");
        assert_eq!(config.endpoints.news_url, DEFAULT_NEWS_URL);
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn test_config_bad_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let result = BannerConfig::from_lookup(
            dir.path(),
            lookup_from(&[("STATBANNER_HTTP_TIMEOUT_SECS", "soon")]),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = BannerConfig::from_lookup(
            dir.path(),
            lookup_from(&[("STATBANNER_HTTP_TIMEOUT_SECS", "0")]),
        );
        assert!(matches!(result, Err(Error::Config(ref msg)) if msg.contains("greater than zero")));
    }
}
