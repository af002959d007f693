use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

/// Backing store selected by `DATABASE_CLIENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DatabaseClient {
    Postgres,
    Memory,
}

impl DatabaseClient {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unsupported DATABASE_CLIENT {other:?}"),
        }
    }
}

pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
/// `SESSION_TTL_DAYS` outside `1..=MAX_SESSION_TTL_DAYS` falls back to the default.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_days: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_client: DatabaseClient,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_client = match lookup("DATABASE_CLIENT") {
            Some(raw) => DatabaseClient::parse(&raw)?,
            None => DatabaseClient::Postgres,
        };
        let database_url = lookup("DATABASE_URL");
        if database_client == DatabaseClient::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when DATABASE_CLIENT is pg");
        }

        let port = match lookup("APP_PORT") {
            Some(raw) => raw.parse::<u16>().context("APP_PORT")?,
            None => 3333,
        };

        let session = SessionConfig {
            ttl_days: lookup("SESSION_TTL_DAYS")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|days| (1..=MAX_SESSION_TTL_DAYS).contains(days))
                .unwrap_or(DEFAULT_SESSION_TTL_DAYS),
            cookie_secure: lookup("COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        Ok(Self {
            database_client,
            database_url,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            session,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Configuration for tests and local runs without a database.
    pub fn in_memory() -> Self {
        Self {
            database_client: DatabaseClient::Memory,
            database_url: None,
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            session: SessionConfig {
                ttl_days: DEFAULT_SESSION_TTL_DAYS,
                cookie_secure: false,
            },
        }
    }
}
