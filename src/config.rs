// src/config.rs
use std::{env, fmt, net::SocketAddr, str::FromStr, time::Duration};
use thiserror::Error;
use url::Url;

use crate::infrastructure::{
    cache::CacheSettings,
    content_api::{Backoff, ContentApiConfig, RetryPolicy},
    logging::{LogFormat, LoggingConfig},
};

const MAX_RETRY_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "unknown environment `{other}` (expected development, production or test)"
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    content_api: ContentApiConfig,
    cache: CacheSettings,
    webhook_token: Option<String>,
    logging: LoggingConfig,
    listen_addr: SocketAddr,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

/// Accumulates violations so a single run reports all of them.
struct Reader<F> {
    lookup: F,
    violations: Vec<String>,
}

impl<F> Reader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parsed<T>(&mut self, key: &str, default: T, accept: impl Fn(&T) -> bool, rule: &str) -> T
    where
        T: FromStr,
    {
        let Some(raw) = self.raw(key) else {
            return default;
        };
        match raw.parse::<T>() {
            Ok(value) if accept(&value) => value,
            _ => {
                self.violations
                    .push(format!("{key} must be {rule}, got `{raw}`"));
                default
            }
        }
    }

    fn choice<T>(&mut self, key: &str, default: T) -> T
    where
        T: FromStr<Err = String>,
    {
        let Some(raw) = self.raw(key) else {
            return default;
        };
        raw.parse::<T>().unwrap_or_else(|reason| {
            self.violations.push(format!("{key}: {reason}"));
            default
        })
    }
}

impl AppConfig {
    /// Build configuration from the process environment, after loading `.env`
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Every invalid value is
    /// reported in a single [`ConfigError::Invalid`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut reader = Reader {
            lookup,
            violations: Vec::new(),
        };

        let base_url = reader.raw("CONTENT_API_URL").unwrap_or_default();
        if base_url.is_empty() {
            reader.violations.push("CONTENT_API_URL is required".to_string());
        } else {
            match Url::parse(&base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
                _ => reader.violations.push(format!(
                    "CONTENT_API_URL must be an absolute http(s) url, got `{base_url}`"
                )),
            }
        }

        let token = reader.raw("CONTENT_API_TOKEN");
        let timeout_ms = reader.parsed(
            "CONTENT_API_TIMEOUT_MS",
            10_000_u64,
            |v| *v > 0,
            "a positive integer",
        );
        let max_attempts = reader.parsed(
            "CONTENT_API_RETRY_ATTEMPTS",
            3_u32,
            |v| (1..=MAX_RETRY_ATTEMPTS).contains(v),
            "an integer between 1 and 10",
        );
        let delay_ms = reader.parsed(
            "CONTENT_API_RETRY_DELAY_MS",
            1_000_u64,
            |_| true,
            "a non-negative integer",
        );
        let backoff = reader.choice("CONTENT_API_RETRY_BACKOFF", Backoff::Fixed);

        let ttl_secs = reader.parsed(
            "CACHE_TTL_SECONDS",
            300_u64,
            |v| *v > 0,
            "a positive integer",
        );
        let swr_secs = reader.parsed(
            "CACHE_STALE_WHILE_REVALIDATE_SECONDS",
            60_u64,
            |_| true,
            "a non-negative integer",
        );
        let webhook_token = reader.raw("CACHE_WEBHOOK_TOKEN");

        let level = reader
            .raw("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string());
        if tracing_subscriber::EnvFilter::try_new(&level).is_err() {
            reader
                .violations
                .push(format!("LOG_LEVEL is not a valid filter directive: `{level}`"));
        }
        let format = reader.choice("LOG_FORMAT", LogFormat::Pretty);
        let environment = reader.choice("APP_ENV", Environment::Development);

        let listen_addr = reader.parsed(
            "LISTEN_ADDR",
            default_listen_addr(),
            |_| true,
            "a socket address such as 127.0.0.1:8080",
        );
        let allowed_origins = reader
            .raw("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        if !reader.violations.is_empty() {
            return Err(ConfigError::Invalid(reader.violations));
        }

        Ok(Self {
            content_api: ContentApiConfig::default()
                .with_base_url(base_url)
                .with_timeout(Duration::from_millis(timeout_ms))
                .with_retry(RetryPolicy {
                    max_attempts,
                    delay: Duration::from_millis(delay_ms),
                    backoff,
                })
                .with_optional_token(token),
            cache: CacheSettings {
                default_ttl: Duration::from_secs(ttl_secs),
                stale_while_revalidate: Duration::from_secs(swr_secs),
            },
            webhook_token,
            logging: LoggingConfig {
                level,
                format,
                environment,
            },
            listen_addr,
            allowed_origins,
        })
    }

    pub fn content_api(&self) -> &ContentApiConfig {
        &self.content_api
    }

    pub fn cache(&self) -> CacheSettings {
        self.cache
    }

    pub fn webhook_token(&self) -> Option<&str> {
        self.webhook_token.as_deref()
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn environment(&self) -> Environment {
        self.logging.environment
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}
