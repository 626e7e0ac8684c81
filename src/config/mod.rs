use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Preview,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "preview" | "staging" => Self::Preview,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, loaded once at process start and passed into the
/// intake service explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub mail: MailConfig,
    pub business: BusinessProfile,
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

        let business = BusinessProfile::from_env();
        let mail = MailConfig::from_env(&business.email)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail,
            business,
        })
    }

    /// Live SMTP dispatch requires the production stage and a configured
    /// relay credential; everything else simulates delivery.
    pub fn live_dispatch(&self) -> bool {
        self.environment == AppEnvironment::Production && self.mail.app_password.is_some()
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

/// Mail relay account and delivery options.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay account username; also the default business mailbox.
    pub username: String,
    /// App password for the relay account. Absent means simulated dispatch.
    pub app_password: Option<String>,
    /// When true, every accepted submission also gets a confirmation email.
    pub send_confirmation: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Explicit connection timeout so the relay default is never inherited
    /// silently.
    pub timeout: Duration,
}

impl MailConfig {
    fn from_env(default_username: &str) -> Result<Self, ConfigError> {
        let username =
            env::var("EMAIL_USER").unwrap_or_else(|_| default_username.to_string());
        let app_password = env::var("EMAIL_APP_PASSWORD")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let send_confirmation = env::var("SEND_CONFIRMATION")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "465".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidSmtpPort)?;
        let timeout_secs = env::var("SMTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidSmtpTimeout)?;

        Ok(Self {
            username,
            app_password,
            send_confirmation,
            smtp_host,
            smtp_port,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Identity details woven into the outbound email templates.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
    pub website: String,
    pub director: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "Sunshine Fitsum Daycare".to_string(),
            email: "fitsum@sunshinefitsumdaycare.com".to_string(),
            phone: "+1 (206) 688-9088".to_string(),
            street_address: "1905 Walnut Street, Everett, WA 98201".to_string(),
            website: "sunshinefitsumdaycare.com".to_string(),
            director: "Fitsum Wodajo".to_string(),
        }
    }
}

impl BusinessProfile {
    fn from_env() -> Self {
        let mut profile = Self::default();
        if let Ok(name) = env::var("BUSINESS_NAME") {
            profile.name = name;
        }
        if let Ok(email) = env::var("BUSINESS_EMAIL") {
            profile.email = email;
        }
        if let Ok(phone) = env::var("BUSINESS_PHONE") {
            profile.phone = phone;
        }
        profile
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("SMTP_PORT must be a valid u16")]
    InvalidSmtpPort,
    #[error("SMTP_TIMEOUT_SECS must be a whole number of seconds")]
    InvalidSmtpTimeout,
}
