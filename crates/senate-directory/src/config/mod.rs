use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_RECORDS_PATH: &str = "data/senators.json";
const DEFAULT_IMAGES_PATH: &str = "data/imgSources.json";
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;
const DEFAULT_SESSION_CAPACITY: usize = 1024;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the directory service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub sessions: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let records_path = data_path("DIRECTORY_RECORDS_PATH", DEFAULT_RECORDS_PATH)?;
        let images_path = data_path("DIRECTORY_IMAGES_PATH", DEFAULT_IMAGES_PATH)?;

        let idle_secs = session_limit("DIRECTORY_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?;
        let capacity = session_limit("DIRECTORY_SESSION_CAPACITY", DEFAULT_SESSION_CAPACITY)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig {
                records_path,
                images_path,
            },
            sessions: SessionConfig {
                idle_secs,
                capacity,
            },
        })
    }
}

fn data_path(variable: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { variable }),
        Ok(value) => Ok(PathBuf::from(value.trim())),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

fn session_limit<T>(variable: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match env::var(variable) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(limit) if limit > T::default() => Ok(limit),
            _ => Err(ConfigError::InvalidSessionLimit { variable }),
        },
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the roster and image-map documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub records_path: PathBuf,
    pub images_path: PathBuf,
}

/// Bounds on the per-viewer session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Sessions untouched for longer than this are evicted.
    pub idle_secs: u64,
    /// Upper bound on stored sessions; the least recently touched go first.
    pub capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_secs: DEFAULT_SESSION_IDLE_SECS,
            capacity: DEFAULT_SESSION_CAPACITY,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyPath { variable: &'static str },
    InvalidSessionLimit { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyPath { variable } => {
                write!(f, "{variable} must not be empty when set")
            }
            ConfigError::InvalidSessionLimit { variable } => {
                write!(f, "{variable} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::EmptyPath { .. }
            | ConfigError::InvalidSessionLimit { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
