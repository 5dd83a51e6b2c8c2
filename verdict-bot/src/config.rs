//! Bot configuration
//!
//! Defines all configurable parameters for the bot: credentials for the
//! status API and the messaging channel, endpoints, and timing.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_CHANNEL_API_URL: &str = "https://api.telegram.org";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_INITIAL_LOOKBACK_SECS: u64 = 86_400;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration problems that prevent the bot from starting
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Bot configuration
#[derive(Debug)]
pub struct Config {
    /// OAuth token for the status API
    pub api_token: SecretString,

    /// Telegram bot token
    pub channel_token: SecretString,

    /// Telegram chat that receives notifications
    pub channel_destination: String,

    /// Full URL of the status endpoint
    pub api_endpoint: String,

    /// Telegram Bot API base URL (e.g., "https://api.telegram.org")
    pub channel_api_url: String,

    /// Pause between poll cycles
    pub poll_interval: Duration,

    /// How far back the first poll looks
    pub initial_lookback: Duration,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - API_TOKEN (required)
    /// - CHANNEL_TOKEN (required)
    /// - CHANNEL_DESTINATION (required)
    /// - API_ENDPOINT (optional, default: Practicum homework statuses)
    /// - CHANNEL_API_URL (optional, default: https://api.telegram.org)
    /// - POLL_INTERVAL (optional, seconds, default: 600)
    /// - INITIAL_LOOKBACK (optional, seconds, default: 86400)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Check all three secrets before touching anything else
        let api_token = required(&lookup, "API_TOKEN")?;
        let channel_token = required(&lookup, "CHANNEL_TOKEN")?;
        let channel_destination = required(&lookup, "CHANNEL_DESTINATION")?;

        let api_endpoint =
            lookup("API_ENDPOINT").unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());
        let channel_api_url = lookup("CHANNEL_API_URL")
            .unwrap_or_else(|| DEFAULT_CHANNEL_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_token: SecretString::from(api_token),
            channel_token: SecretString::from(channel_token),
            channel_destination,
            api_endpoint,
            channel_api_url,
            poll_interval: seconds(&lookup, "POLL_INTERVAL", DEFAULT_POLL_INTERVAL_SECS)?,
            initial_lookback: seconds(
                &lookup,
                "INITIAL_LOOKBACK",
                DEFAULT_INITIAL_LOOKBACK_SECS,
            )?,
            request_timeout: seconds(&lookup, "REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (var, url) in [
            ("API_ENDPOINT", &self.api_endpoint),
            ("CHANNEL_API_URL", &self.channel_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(invalid(var, url, "must start with http:// or https://"));
            }
        }

        if self.poll_interval.is_zero() {
            return Err(invalid("POLL_INTERVAL", "0", "must be greater than 0"));
        }

        if self.request_timeout.is_zero() {
            return Err(invalid("REQUEST_TIMEOUT", "0", "must be greater than 0"));
        }

        Ok(())
    }

    /// Lower bound of the first poll window
    pub fn initial_window_start(&self, now: DateTime<Utc>) -> i64 {
        let lookback = i64::try_from(self.initial_lookback.as_secs()).unwrap_or(i64::MAX);
        now.timestamp().saturating_sub(lookback)
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn seconds<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| invalid(var, &raw, &e.to_string())),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("API_TOKEN", "api-token"),
        ("CHANNEL_TOKEN", "bot-token"),
        ("CHANNEL_DESTINATION", "12345"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.api_token.expose_secret(), "api-token");
        assert_eq!(config.channel_token.expose_secret(), "bot-token");
        assert_eq!(config.channel_destination, "12345");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.channel_api_url, DEFAULT_CHANNEL_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(600));
        assert_eq!(config.initial_lookback, Duration::from_secs(86_400));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_channel_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_TOKEN", "api-token"),
            ("CHANNEL_DESTINATION", "12345"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing("CHANNEL_TOKEN"));
    }

    #[test]
    fn test_each_secret_is_required() {
        for skipped in ["API_TOKEN", "CHANNEL_TOKEN", "CHANNEL_DESTINATION"] {
            let vars: Vec<(&str, &str)> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != skipped)
                .collect();
            let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
            assert!(matches!(err, ConfigError::Missing(var) if var == skipped));
        }
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_TOKEN", "   "),
            ("CHANNEL_TOKEN", "bot-token"),
            ("CHANNEL_DESTINATION", "12345"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing("API_TOKEN"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("API_ENDPOINT", "http://localhost:9000/statuses/"),
            ("CHANNEL_API_URL", "http://localhost:9001/"),
            ("POLL_INTERVAL", "15"),
            ("INITIAL_LOOKBACK", "3600"),
            ("REQUEST_TIMEOUT", "5"),
        ]);

        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.api_endpoint, "http://localhost:9000/statuses/");
        assert_eq!(config.channel_api_url, "http://localhost:9001");
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.initial_lookback, Duration::from_secs(3600));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_unparseable_interval_is_an_error() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("POLL_INTERVAL", "ten minutes"));

        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "POLL_INTERVAL", .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert!(config.validate().is_ok());

        config.api_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
        config.api_endpoint = DEFAULT_API_ENDPOINT.to_string();

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(1);

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("api-token"));
        assert!(!debug.contains("bot-token"));
    }

    #[test]
    fn test_initial_window_start() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(config.initial_window_start(now), 1_700_000_000 - 86_400);
    }
}
