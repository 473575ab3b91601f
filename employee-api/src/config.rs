//! Service configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | DATABASE_HOST | required | PostgreSQL host |
//! | DATABASE_PORT | required | PostgreSQL port |
//! | DATABASE_USER | required | PostgreSQL user |
//! | DATABASE_PASSWORD | required | PostgreSQL password |
//! | DATABASE_NAME | required | Database name |
//! | APP_NAME | Employees API | Reported by `/` and `/health` |
//! | APP_VERSION | 1.0.0 | Reported by `/` |
//! | DEBUG | true | Log every SQL statement |
//! | HTTP_HOST | 0.0.0.0 | Listen address |
//! | HTTP_PORT | 8000 | Listen port |
//! | DB_POOL_SIZE | 10 | Connections kept open |
//! | DB_MAX_OVERFLOW | 20 | Extra connections allowed under load |
//! | DB_ACQUIRE_TIMEOUT_SECS | 30 | Wait for a free connection before failing |

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
    pub app_name: String,
    pub app_version: String,
    /// Echo SQL statements to the log
    pub debug: bool,
    pub http_host: String,
    pub http_port: u16,
    /// Connections kept open in the pool
    pub pool_size: u32,
    /// Extra connections opened on demand beyond `pool_size`
    pub max_overflow: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, BoxError> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{name} must be set").into())
        };
        let optional = |name: &str, default: &str| -> String {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let database_port = required("DATABASE_PORT")?
            .parse::<u16>()
            .map_err(|_| "DATABASE_PORT must be a valid port number")?;
        let http_port = optional("HTTP_PORT", "8000")
            .parse::<u16>()
            .map_err(|_| "HTTP_PORT must be a valid port number")?;
        let debug = parse_bool(&optional("DEBUG", "true"))
            .ok_or("DEBUG must be a boolean (true/false/1/0/yes/no/on/off)")?;
        let pool_size = optional("DB_POOL_SIZE", "10")
            .parse::<u32>()
            .map_err(|_| "DB_POOL_SIZE must be a non-negative integer")?;
        let max_overflow = optional("DB_MAX_OVERFLOW", "20")
            .parse::<u32>()
            .map_err(|_| "DB_MAX_OVERFLOW must be a non-negative integer")?;
        let acquire_timeout_secs = optional("DB_ACQUIRE_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a non-negative integer")?;

        if pool_size + max_overflow == 0 {
            return Err("DB_POOL_SIZE + DB_MAX_OVERFLOW must be at least 1".into());
        }

        Ok(Self {
            database_host: required("DATABASE_HOST")?,
            database_port,
            database_user: required("DATABASE_USER")?,
            database_password: lookup("DATABASE_PASSWORD")
                .ok_or("DATABASE_PASSWORD must be set")?,
            database_name: required("DATABASE_NAME")?,
            app_name: optional("APP_NAME", "Employees API"),
            app_version: optional("APP_VERSION", "1.0.0"),
            debug,
            http_host: optional("HTTP_HOST", "0.0.0.0"),
            http_port,
            pool_size,
            max_overflow,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }

    /// Connection options assembled from the individual DATABASE_* parts
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .username(&self.database_user)
            .password(&self.database_password)
            .database(&self.database_name);

        if self.debug {
            options
        } else {
            use sqlx::ConnectOptions;
            options.disable_statement_logging()
        }
    }

    /// Connection URL with the password masked, for logs
    pub fn database_url_redacted(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.database_user, self.database_host, self.database_port, self.database_name
        )
    }

    /// Upper bound of simultaneously open connections
    pub fn max_connections(&self) -> u32 {
        self.pool_size + self.max_overflow
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
