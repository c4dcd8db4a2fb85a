use std::net::{IpAddr, SocketAddr};

use chrono::{FixedOffset, NaiveDateTime, Utc};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub frontend_url: String,
    /// Offset applied to timestamps printed on badges and by `/time/now`.
    pub display_offset: FixedOffset,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`, `LOG_LEVEL`,
    /// `FRONTEND_URL`, `DISPLAY_UTC_OFFSET_HOURS`
    ///
    /// `PORT` overrides `SERVER_PORT`, and host defaults to `0.0.0.0` in production.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set, or if `SERVER_HOST` / `SERVER_PORT` /
    /// `DISPLAY_UTC_OFFSET_HOURS` contain invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

        let display_offset = parse_offset_hours(
            &std::env::var("DISPLAY_UTC_OFFSET_HOURS").unwrap_or_else(|_| "0".to_string()),
        )?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            frontend_url,
            display_offset,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }

    /// Current wall-clock time in the configured display offset.
    #[must_use]
    pub fn display_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.display_offset).naive_local()
    }
}

/// Parse a whole-hour UTC offset such as `9` or `-5`.
///
/// # Errors
///
/// Returns an error if the value is not an integer in `-23..=23`.
pub fn parse_offset_hours(value: &str) -> anyhow::Result<FixedOffset> {
    let hours = value
        .trim()
        .parse::<i32>()
        .map_err(|_| anyhow::anyhow!("DISPLAY_UTC_OFFSET_HOURS must be an integer"))?;

    if !(-23..=23).contains(&hours) {
        anyhow::bail!("DISPLAY_UTC_OFFSET_HOURS must be between -23 and 23");
    }

    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| anyhow::anyhow!("DISPLAY_UTC_OFFSET_HOURS is out of range"))
}
