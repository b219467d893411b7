use std::collections::HashMap;

use thiserror::Error;

const TOKEN_ENV: &str = "GH_TOKEN";
const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";
const HOST_ENV: &str = "GH_HOST";
const TIMEOUT_ENV: &str = "GH_SEARCH_TIMEOUT_SECS";

const MIN_TIMEOUT_SECS: i64 = 1;
const MAX_TIMEOUT_SECS: i64 = 300;
pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub token: Option<String>,
    pub host: String,
    pub timeout_secs: u64,
}

// Keeps the token out of debug output and logs.
impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let token = [TOKEN_ENV, FALLBACK_TOKEN_ENV]
            .iter()
            .filter_map(|name| env_map.get(*name))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(ToOwned::to_owned);

        let host = parse_host(env_map.get(HOST_ENV).map(String::as_str))?;
        let timeout_secs = parse_timeout(env_map.get(TIMEOUT_ENV).map(String::as_str))?;

        Ok(Self {
            token,
            host,
            timeout_secs,
        })
    }
}

fn parse_host(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_HOST.to_string());
    };

    let is_valid = !value.contains("://")
        && !value.contains('/')
        && !value.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(ConfigError::InvalidHost(value.to_string()));
    }

    Ok(value.to_ascii_lowercase())
}

fn parse_timeout(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_TIMEOUT_SECS);
    };

    let parsed = value
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidTimeout(value.to_string()))?;

    Ok(parsed.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS) as u64)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid GH_HOST: {0} (expected a bare hostname such as github.com)")]
    InvalidHost(String),
    #[error("invalid GH_SEARCH_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_uses_defaults_when_nothing_is_set() {
        let config = RuntimeConfig::from_pairs(Vec::<(String, String)>::new())
            .expect("empty env should parse");

        assert_eq!(config.token, None);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_prefers_gh_token_over_github_token() {
        let config = RuntimeConfig::from_pairs(vec![
            ("GITHUB_TOKEN", "fallback"),
            ("GH_TOKEN", " primary "),
        ])
        .expect("config should parse");

        assert_eq!(config.token.as_deref(), Some("primary"));
    }

    #[test]
    fn config_falls_back_to_github_token_when_gh_token_is_blank() {
        let config =
            RuntimeConfig::from_pairs(vec![("GH_TOKEN", "  "), ("GITHUB_TOKEN", "fallback")])
                .expect("config should parse");

        assert_eq!(config.token.as_deref(), Some("fallback"));
    }

    #[test]
    fn config_normalizes_enterprise_host() {
        let config = RuntimeConfig::from_pairs(vec![("GH_HOST", " GHE.Example.COM ")])
            .expect("host should parse");

        assert_eq!(config.host, "ghe.example.com");
    }

    #[test]
    fn config_rejects_hosts_with_scheme_or_path() {
        for raw in ["https://github.com", "github.com/api", "git hub.com"] {
            let err = RuntimeConfig::from_pairs(vec![("GH_HOST", raw)])
                .expect_err("malformed host should fail");
            assert_eq!(err, ConfigError::InvalidHost(raw.to_string()));
        }
    }

    #[test]
    fn config_clamps_timeout_into_supported_range() {
        let lower = RuntimeConfig::from_pairs(vec![("GH_SEARCH_TIMEOUT_SECS", "0")])
            .expect("lower bound should parse");
        assert_eq!(lower.timeout_secs, 1);

        let upper = RuntimeConfig::from_pairs(vec![("GH_SEARCH_TIMEOUT_SECS", "9000")])
            .expect("upper bound should parse");
        assert_eq!(upper.timeout_secs, 300);
    }

    #[test]
    fn config_rejects_non_numeric_timeout() {
        let err = RuntimeConfig::from_pairs(vec![("GH_SEARCH_TIMEOUT_SECS", "soon")])
            .expect_err("invalid timeout should fail");

        assert_eq!(err, ConfigError::InvalidTimeout("soon".to_string()));
    }

    #[test]
    fn config_debug_output_redacts_token() {
        let config = RuntimeConfig::from_pairs(vec![("GH_TOKEN", "ghp_secret")])
            .expect("config should parse");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
