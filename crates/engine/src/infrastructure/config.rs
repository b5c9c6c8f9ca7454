//! Engine configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default catalog root, containing `default/` and `custom/`.
pub const DEFAULT_TOKENS_DIR: &str = "public/tokens";

/// Default root for site-relative portrait paths.
pub const DEFAULT_STATIC_ROOT: &str = "public";

/// Portrait checks give up after this long.
pub const DEFAULT_PORTRAIT_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the ClickHouse HTTP interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickHouseConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Browser origins allowed to call the API cross-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`
    Any,
    /// Comma-separated list, blanks dropped
    List(Vec<String>),
}

impl CorsOrigins {
    /// `None` when the value lists no origin at all. A `*` entry anywhere
    /// means any origin.
    pub fn parse(value: &str) -> Option<Self> {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
        if origins.iter().any(|origin| origin == "*") {
            return Some(Self::Any);
        }
        (!origins.is_empty()).then_some(Self::List(origins))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// `None` keeps templates in memory for the lifetime of the process.
    pub clickhouse: Option<ClickHouseConfig>,
    pub tokens_dir: PathBuf,
    pub static_root: PathBuf,
    pub portrait_timeout: Duration,
    /// `None` leaves CORS disabled.
    pub cors: Option<CorsOrigins>,
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = var("SERVER_PORT")
            .or_else(|| var("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let clickhouse = var("CLICKHOUSE_URL").map(|url| ClickHouseConfig {
            url,
            user: var("CLICKHOUSE_USER").unwrap_or_else(|| "default".into()),
            password: lookup("CLICKHOUSE_PASSWORD").unwrap_or_default(),
            database: var("CLICKHOUSE_DATABASE").unwrap_or_else(|| "default".into()),
        });

        let portrait_timeout = var("PORTRAIT_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_PORTRAIT_TIMEOUT_SECS);

        Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port,
            clickhouse,
            tokens_dir: PathBuf::from(var("TOKENS_DIR").unwrap_or_else(|| DEFAULT_TOKENS_DIR.into())),
            static_root: PathBuf::from(
                var("STATIC_ROOT").unwrap_or_else(|| DEFAULT_STATIC_ROOT.into()),
            ),
            portrait_timeout: Duration::from_secs(portrait_timeout),
            cors: var("CORS_ALLOWED_ORIGINS").and_then(|v| CorsOrigins::parse(&v)),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
