//! Environment-backed configuration for the hunt services.

use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment environment resolved from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Staging,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnvironment::Production,
            "staging" | "stage" => AppEnvironment::Staging,
            _ => AppEnvironment::Development,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Staging => "staging",
            AppEnvironment::Production => "production",
        }
    }
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configured host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host == "localhost" {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host.parse().map_err(|source| ConfigError::InvalidHost {
                host: self.host.clone(),
                source,
            })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Matching-pipeline knobs resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Minimum score a posting must reach to count as a match.
    pub min_match_score: f64,
    /// Reject instead of flag when many required skills are missing.
    pub strict_validation: bool,
    /// Upper bound on matches critiqued per pipeline run.
    pub max_matches_per_run: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            min_match_score: 0.7,
            strict_validation: false,
            max_matches_per_run: 10,
        }
    }
}

impl PipelineSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let min_match_score = match env::var("APP_MIN_MATCH_SCORE") {
            Ok(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|score| (0.0..=1.0).contains(score))
                .ok_or(ConfigError::InvalidMatchScore { value: raw })?,
            Err(_) => defaults.min_match_score,
        };

        let strict_validation = match env::var("APP_STRICT_VALIDATION") {
            Ok(raw) => parse_flag(&raw),
            Err(_) => defaults.strict_validation,
        };

        let max_matches_per_run = match env::var("APP_MAX_MATCHES_PER_RUN") {
            Ok(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|cap| *cap > 0)
                .ok_or(ConfigError::InvalidMatchCap { value: raw })?,
            Err(_) => defaults.max_matches_per_run,
        };

        Ok(Self {
            min_match_score,
            strict_validation,
            max_matches_per_run,
        })
    }
}

/// Application configuration resolved from the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub log_level: String,
    pub pipeline: PipelineSettings,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to development
    /// defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let host = env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port_raw = env::var("APP_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: port_raw.clone() })?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        let pipeline = PipelineSettings::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            log_level,
            pipeline,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration failures surfaced at startup.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort { value: String },
    InvalidHost { host: String, source: AddrParseError },
    InvalidMatchScore { value: String },
    InvalidMatchCap { value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "APP_PORT must be a valid TCP port, got {value:?}")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST is not a valid address: {host:?}")
            }
            ConfigError::InvalidMatchScore { value } => {
                write!(
                    f,
                    "APP_MIN_MATCH_SCORE must be a number between 0.0 and 1.0, got {value:?}"
                )
            }
            ConfigError::InvalidMatchCap { value } => {
                write!(
                    f,
                    "APP_MAX_MATCHES_PER_RUN must be a positive integer, got {value:?}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidPort { .. }
            | ConfigError::InvalidMatchScore { .. }
            | ConfigError::InvalidMatchCap { .. } => None,
        }
    }
}
