use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EnvironmentProvider;
use crate::config::errors::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://sppg.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REGION_API_URL: &str = "https://www.emsifa.com/api-wilayah-indonesia/api";
const DEFAULT_SPPG_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Process configuration, loaded once at start-up from the environment
#[derive(Clone)]
pub struct AppSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    jwt_secret: String,
    region_api_url: String,
    sppg_api_url: String,
    sppg_api_token: Option<String>,
    http_timeout: Duration,
}

impl AppSettings {
    /// Load settings through the given environment provider
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `JWT_SECRET` is missing or too short, or when
    /// a numeric setting cannot be parsed.
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ConfigError> {
        let get = |key: &str| env_provider.get_var(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or_else(|| ConfigError::missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("at least {} characters", MIN_JWT_SECRET_LENGTH),
                format!("{} characters", jwt_secret.len()),
            ));
        }

        let server_port = match get("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::invalid("HTTP_TIMEOUT_SECS", "positive integer", value.clone()))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port,
            jwt_secret,
            region_api_url: get("REGION_API_URL")
                .unwrap_or_else(|| DEFAULT_REGION_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            sppg_api_url: get("SPPG_API_URL")
                .unwrap_or_else(|| DEFAULT_SPPG_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            sppg_api_token: get("SPPG_API_TOKEN"),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        value
            .parse::<u16>()
            .ok()
            .filter(|port| *port >= 1)
            .ok_or_else(|| ConfigError::invalid("PORT", "integer between 1 and 65535", value))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn region_api_url(&self) -> &str {
        &self.region_api_url
    }

    pub fn sppg_api_url(&self) -> &str {
        &self.sppg_api_url
    }

    pub fn sppg_api_token(&self) -> Option<&str> {
        self.sppg_api_token.as_deref()
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_secret", &"[redacted]")
            .field("region_api_url", &self.region_api_url)
            .field("sppg_api_url", &self.sppg_api_url)
            .field("sppg_api_token", &self.sppg_api_token.as_ref().map(|_| "[redacted]"))
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}
