use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// PostgreSQL connection settings, read from the discrete `DB_*` variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode)
    }
}

/// Service configuration loaded once at startup. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub port: u16,
    pub openai_api_key: String,
    pub llm_timeout: Duration,
    pub upload_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            host: var_or("DB_HOST", "127.0.0.1"),
            port: parse_var(&lookup, "DB_PORT", 5432)?,
            user: var_or("DB_USER", "postgres"),
            password: var_or("DB_PASS", "postgres"),
            name: var_or("DB_NAME", "resume_checker"),
            ssl_mode: PgSslMode::from_str(&var_or("DB_SSLMODE", "prefer"))
                .context("DB_SSLMODE must be a valid PostgreSQL sslmode")?,
        };

        let upload_dir = match lookup("UPLOAD_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_upload_dir(),
        };

        Ok(Config {
            database,
            port: parse_var(&lookup, "PARSER_PORT", 5000)?,
            openai_api_key: require_var(&lookup, "OPENAI_API_KEY")?,
            llm_timeout: Duration::from_secs(parse_var(&lookup, "LLM_TIMEOUT_SECS", 60)?),
            upload_dir: absolutize(&upload_dir),
            rust_log: var_or("RUST_LOG", "info"),
        })
    }
}

fn require_var<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// `<install dir>/../uploads`, where the install dir holds the running binary.
fn default_upload_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("..").join("uploads")))
        .unwrap_or_else(|| PathBuf::from("uploads"))
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
