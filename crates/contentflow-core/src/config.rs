//! Client configuration for `ContentFlow`.
//!
//! Settings come from explicit values first, then `CONTENTFLOW_*`
//! environment variables, then defaults.

use std::time::Duration;

/// Content API used by deployed builds.
pub const PRODUCTION_API_URL: &str = "https://ai-multi-agent-systems-backend.onrender.com";
/// Content API used during local development.
pub const LOCAL_API_URL: &str = "http://localhost:8000";

/// Which API deployment to talk to when no URL is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Default API base URL for this environment.
    pub fn default_api_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_URL,
            Self::Development => LOCAL_API_URL,
        }
    }
}

/// Content API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, without the `/api/...` path.
    pub base_url: String,
    pub environment: Environment,
    /// Whole-request timeout. `None` waits indefinitely; generation can take
    /// well over a minute.
    pub timeout: Option<Duration>,
    /// Log filter (e.g. `warn`, `contentflow_core=debug`).
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: LOCAL_API_URL.to_owned(),
            environment: Environment::Development,
            timeout: None,
            log_level: "warn".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `CONTENTFLOW_API_URL` — API base URL (overrides `CONTENTFLOW_ENV`)
    /// - `CONTENTFLOW_ENV` — `production` or `development` (default: `development`)
    /// - `CONTENTFLOW_TIMEOUT_SECS` — request timeout in seconds (default: none)
    /// - `CONTENTFLOW_LOG_LEVEL` — log filter (default: `warn`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = lookup("CONTENTFLOW_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let base_url = first_non_empty(&[
            &lookup("CONTENTFLOW_API_URL").unwrap_or_default(),
            environment.default_api_url(),
        ])
        .trim_end_matches('/')
        .to_owned();

        let timeout = lookup("CONTENTFLOW_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let log_level = first_non_empty(&[
            &lookup("CONTENTFLOW_LOG_LEVEL").unwrap_or_default(),
            "warn",
        ]);

        Self {
            base_url,
            environment,
            timeout,
            log_level,
        }
    }

    /// Replace the base URL if `url` is non-empty.
    #[must_use]
    pub fn with_base_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.base_url = url.trim_end_matches('/').to_owned();
        }
        self
    }
}

fn first_non_empty(vals: &[&str]) -> String {
    vals.iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> ClientConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ClientConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_local_development() {
        let cfg = load(&[]);
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, LOCAL_API_URL);
    }

    #[test]
    fn production_env_selects_hosted_api() {
        let cfg = load(&[("CONTENTFLOW_ENV", "Production")]);
        assert_eq!(cfg.environment, Environment::Production);
        assert_eq!(cfg.base_url, PRODUCTION_API_URL);
    }

    #[test]
    fn explicit_url_wins_over_environment() {
        let cfg = load(&[
            ("CONTENTFLOW_ENV", "production"),
            ("CONTENTFLOW_API_URL", "http://10.0.0.5:9000/"),
        ]);
        assert_eq!(cfg.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn timeout_and_log_level_parse() {
        let cfg = load(&[
            ("CONTENTFLOW_TIMEOUT_SECS", "90"),
            ("CONTENTFLOW_LOG_LEVEL", "debug"),
        ]);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(90)));
        assert_eq!(cfg.log_level, "debug");

        let cfg = load(&[("CONTENTFLOW_TIMEOUT_SECS", "soon")]);
        assert_eq!(cfg.timeout, None);
        let cfg = load(&[("CONTENTFLOW_TIMEOUT_SECS", "0")]);
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn with_base_url_ignores_blank_override() {
        let cfg = ClientConfig::default().with_base_url(Some("  "));
        assert_eq!(cfg.base_url, LOCAL_API_URL);
        let cfg = ClientConfig::default().with_base_url(Some("http://api.local/"));
        assert_eq!(cfg.base_url, "http://api.local");
    }
}
