//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Origins allowed to call the API from a browser when nothing else is configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://your-vercel-domain.vercel.app",
];

/// Source of the timestamp reported by `/health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthClock {
    /// Always report the published literal timestamp.
    #[default]
    Fixed,
    /// Report the current UTC time.
    Live,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Cross-Origin ===
    /// Browser origins allowed to make credentialed requests.
    #[serde(default = "default_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,

    // === Responses ===
    /// Timestamp source for the health check.
    #[serde(default)]
    pub health_clock: HealthClock,

    // === Observability ===
    /// Port for the Prometheus exporter; metrics are not exported when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_bind_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            cors_allowed_origins: default_allowed_origins(),
            health_clock: HealthClock::default(),
            metrics_port: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.cors_allowed_origins.is_empty() {
            return Err("CORS_ALLOWED_ORIGINS must list at least one origin".to_string());
        }

        self.allowed_origin_headers()?;

        if self.metrics_port == Some(self.port) {
            return Err(format!(
                "METRICS_PORT must differ from PORT (both are {})",
                self.port
            ));
        }

        Ok(())
    }

    /// Parse the allow-list into header values for the CORS layer.
    pub fn allowed_origin_headers(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_allowed_origins
            .iter()
            .map(|origin| {
                let origin = origin.trim();
                if origin == "*" {
                    return Err(
                        "CORS_ALLOWED_ORIGINS cannot contain '*' when credentials are allowed"
                            .to_string(),
                    );
                }
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(format!("origin {origin:?} must start with http:// or https://"));
                }
                HeaderValue::from_str(origin)
                    .map_err(|e| format!("origin {origin:?} is not a valid header value: {e}"))
            })
            .collect()
    }

    /// Socket address of the HTTP server.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Socket address of the metrics exporter, if enabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port
            .map(|port| SocketAddr::new(self.bind_addr, port))
    }
}
