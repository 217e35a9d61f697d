use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::Duration;
use researchpilot_infrastructure::search::DEFAULT_ARXIV_URL;

/// Only acceptable outside release builds.
const DEV_TOKEN_SECRET: &str = "researchpilot-dev-secret-change-me";

const ACCESS_TOKEN_MINUTES: RangeInclusive<i64> = 1..=7 * 24 * 60;
const REFRESH_TOKEN_DAYS: RangeInclusive<i64> = 1..=365;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    pub token_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Atom query endpoint used by paper search.
    pub arxiv_url: String,
    /// Problems found while loading. Reported once logging is up.
    pub warnings: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RP_TOKEN_SECRET must be set in release builds")]
    MissingTokenSecret,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `lookup` returns the raw value of a variable, `None` when unset.
    pub fn from_lookup<F>(lookup: F, allow_dev_secret: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut loader = Loader {
            lookup,
            warnings: Vec::new(),
        };

        let host = loader.string("RP_HOST", "0.0.0.0");
        let port = loader.parse("RP_PORT", 8000u16);
        let db_path = loader.string("RP_DB_PATH", "./data/researchpilot.sqlite");
        let log_dir = loader.string("RP_LOG_DIR", "./data/logs");
        let cors_origins = loader
            .string("RP_CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let access_minutes =
            loader.parse_in_range("RP_ACCESS_TOKEN_MINUTES", 30, ACCESS_TOKEN_MINUTES);
        let refresh_days = loader.parse_in_range("RP_REFRESH_TOKEN_DAYS", 7, REFRESH_TOKEN_DAYS);
        let arxiv_url = loader.string("RP_ARXIV_URL", DEFAULT_ARXIV_URL);

        let token_secret = match (loader.lookup)("RP_TOKEN_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if allow_dev_secret => {
                loader
                    .warnings
                    .push("RP_TOKEN_SECRET not set, using the development secret".to_string());
                DEV_TOKEN_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingTokenSecret),
        };

        Ok(Self {
            host,
            port,
            db_path,
            log_dir,
            cors_origins,
            token_secret,
            access_token_ttl: Duration::minutes(access_minutes),
            refresh_token_ttl: Duration::days(refresh_days),
            arxiv_url,
            warnings: loader.warnings,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Loader<F> {
    lookup: F,
    warnings: Vec<String>,
}

impl<F> Loader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&mut self, key: &str, default: &str) -> String {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Unparseable values fall back to `default` with a warning.
    fn parse<T>(&mut self, key: &str, default: T) -> T
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match (self.lookup)(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                self.warnings.push(format!(
                    "Invalid {} value '{}': {}, using default {}",
                    key, raw, e, default
                ));
                default
            }),
        }
    }

    /// Bounded so the resulting durations can be added to any current time.
    fn parse_in_range(&mut self, key: &str, default: i64, range: RangeInclusive<i64>) -> i64 {
        let value = self.parse(key, default);
        if range.contains(&value) {
            value
        } else {
            self.warnings.push(format!(
                "{} must be between {} and {}, using default {}",
                key,
                range.start(),
                range.end(),
                default
            ));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], allow_dev_secret: bool) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned(), allow_dev_secret)
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[], true).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.db_path, "./data/researchpilot.sqlite");
        assert_eq!(config.log_dir, "./data/logs");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.token_secret, DEV_TOKEN_SECRET);
        assert_eq!(config.arxiv_url, "http://export.arxiv.org/api/query");
        assert_eq!(config.warnings.len(), 1);
    }

    #[test]
    fn arxiv_url_can_point_at_a_mirror() {
        let config = load(&[("RP_ARXIV_URL", " http://127.0.0.1:9000/api/query ")], true).unwrap();

        assert_eq!(config.arxiv_url, "http://127.0.0.1:9000/api/query");
    }

    #[test]
    fn release_requires_secret() {
        assert_eq!(load(&[], false).unwrap_err(), ConfigError::MissingTokenSecret);
        assert!(load(&[("RP_TOKEN_SECRET", "s3cret")], false).is_ok());
    }

    #[test]
    fn invalid_values_warn_and_fall_back() {
        let config = load(
            &[
                ("RP_PORT", "not-a-port"),
                ("RP_ACCESS_TOKEN_MINUTES", "0"),
                ("RP_TOKEN_SECRET", "s3cret"),
            ],
            true,
        )
        .unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.warnings.len(), 2);
    }

    #[test]
    fn oversized_token_lifetimes_warn_and_fall_back() {
        let config = load(
            &[
                ("RP_ACCESS_TOKEN_MINUTES", "10081"),
                ("RP_REFRESH_TOKEN_DAYS", "9999999999999"),
                ("RP_TOKEN_SECRET", "s3cret"),
            ],
            true,
        )
        .unwrap();

        assert_eq!(config.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[1].contains("RP_REFRESH_TOKEN_DAYS must be between 1 and 365"));
    }

    #[test]
    fn token_lifetimes_at_the_bounds_are_kept() {
        let config = load(
            &[
                ("RP_ACCESS_TOKEN_MINUTES", "10080"),
                ("RP_REFRESH_TOKEN_DAYS", "365"),
                ("RP_TOKEN_SECRET", "s3cret"),
            ],
            true,
        )
        .unwrap();

        assert_eq!(config.access_token_ttl, Duration::days(7));
        assert_eq!(config.refresh_token_ttl, Duration::days(365));
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(
            &[(
                "RP_CORS_ORIGINS",
                "http://a.example, http://b.example ,,",
            )],
            true,
        )
        .unwrap();

        assert_eq!(
            config.cors_origins,
            vec!["http://a.example", "http://b.example"]
        );
    }
}
