use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

/// Hosted mock endpoint the form posts to when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://run.mocky.io/v3/c2875e3f-dce0-411a-b0f4-24974cce2b6e";

/// Distinguishes runtime behavior for different stages of the application.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub submission: SubmissionConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("INTAKE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let endpoint_raw =
            env::var("INTAKE_ENDPOINT_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.to_string());
        let endpoint = parse_endpoint(&endpoint_raw)?;

        let send_accept_header = match env::var("INTAKE_SEND_ACCEPT_HEADER") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidAcceptFlag { value: raw })?,
            Err(_) => true,
        };

        let host = env::var("INTAKE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("INTAKE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("INTAKE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            submission: SubmissionConfig {
                endpoint,
                send_accept_header,
            },
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

/// Where and how validated forms are posted.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub endpoint: Url,
    /// Adds `Accept: application/json` to outbound requests. When off, reqwest's default
    /// `Accept: */*` is sent instead.
    pub send_accept_header: bool,
}

impl SubmissionConfig {
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint,
            send_accept_header: true,
        }
    }
}

/// Settings controlling the development receiver binding.
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
    /// Colored output, only for interactive development terminals.
    pub ansi: bool,
}

pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            value: raw.to_string(),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    UnsupportedScheme {
        value: String,
    },
    InvalidAcceptFlag {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "INTAKE_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "INTAKE_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEndpoint { value, .. } => {
                write!(f, "INTAKE_ENDPOINT_URL '{value}' is not a valid URL")
            }
            ConfigError::UnsupportedScheme { value } => {
                write!(f, "INTAKE_ENDPOINT_URL '{value}' must use http or https")
            }
            ConfigError::InvalidAcceptFlag { value } => {
                write!(f, "INTAKE_SEND_ACCEPT_HEADER '{value}' must be true or false")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidEndpoint { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::UnsupportedScheme { .. }
            | ConfigError::InvalidAcceptFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("INTAKE_ENV");
        env::remove_var("INTAKE_ENDPOINT_URL");
        env::remove_var("INTAKE_SEND_ACCEPT_HEADER");
        env::remove_var("INTAKE_HOST");
        env::remove_var("INTAKE_PORT");
        env::remove_var("INTAKE_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.submission.endpoint.as_str(), DEFAULT_ENDPOINT_URL);
        assert!(config.submission.send_accept_header);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_endpoint_and_accept_flag_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_ENV", "ci");
        env::set_var("INTAKE_ENDPOINT_URL", "http://127.0.0.1:8080/api/v1/forms");
        env::set_var("INTAKE_SEND_ACCEPT_HEADER", "off");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(
            config.submission.endpoint.as_str(),
            "http://127.0.0.1:8080/api/v1/forms"
        );
        assert!(!config.submission.send_accept_header);
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_ENDPOINT_URL", "ftp://example.com/forms");
        match AppConfig::load() {
            Err(ConfigError::UnsupportedScheme { value }) => {
                assert_eq!(value, "ftp://example.com/forms")
            }
            other => panic!("expected unsupported scheme, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_unknown_accept_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_SEND_ACCEPT_HEADER", "maybe");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAcceptFlag { .. })
        ));
        reset_env();
    }
}
