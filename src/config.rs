use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    Static,
    Preference,
}

impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "preference" => Ok(Self::Preference),
            other => Err(format!("unknown match scorer '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub demo_otp: String,
    pub storage_backend: StorageBackend,
    pub storage_dir: PathBuf,
    pub database_url: Option<String>,
    pub arrival_delay_secs: u64,
    pub eta_tick_secs: u64,
    pub initial_eta_minutes: u32,
    pub match_scorer: ScorerKind,
    pub public_rps: u32,
    pub api_rps: u32,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let storage_backend = get_env_or("STORAGE_BACKEND", StorageBackend::Memory)?;
        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(Error::Config(
                "DATABASE_URL is required when STORAGE_BACKEND=postgres".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            jwt_secret: get_env("JWT_SECRET")?,
            token_ttl_minutes: get_env_or("TOKEN_TTL_MINUTES", 24 * 60)?,
            demo_otp: env::var("DEMO_OTP").unwrap_or_else(|_| "1234".to_string()),
            storage_backend,
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            database_url,
            arrival_delay_secs: get_env_or("ARRIVAL_DELAY_SECS", 15)?,
            eta_tick_secs: get_env_or("ETA_TICK_SECS", 3)?,
            initial_eta_minutes: get_env_or("INITIAL_ETA_MINUTES", 15)?,
            match_scorer: get_env_or("MATCH_SCORER", ScorerKind::Static)?,
            public_rps: get_env_or("PUBLIC_RPS", 20)?,
            api_rps: get_env_or("API_RPS", 100)?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// In-memory configuration with the demo defaults, used by tests and
    /// local tooling that should not touch the environment.
    pub fn for_tests() -> Self {
        Self {
            server_address: "127.0.0.1:0".to_string(),
            jwt_secret: "test_secret_key".to_string(),
            token_ttl_minutes: 60,
            demo_otp: "1234".to_string(),
            storage_backend: StorageBackend::Memory,
            storage_dir: PathBuf::from("./data"),
            database_url: None,
            arrival_delay_secs: 15,
            eta_tick_secs: 3,
            initial_eta_minutes: 15,
            match_scorer: ScorerKind::Static,
            public_rps: 1000,
            api_rps: 1000,
            log_json: false,
        }
    }

    pub fn arrival_delay(&self) -> Duration {
        Duration::from_secs(self.arrival_delay_secs)
    }

    pub fn eta_tick(&self) -> Duration {
        Duration::from_secs(self.eta_tick_secs.max(1))
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_backend_names() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!(" File ".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert_eq!("postgresql".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn parses_scorer_names() {
        assert_eq!("preference".parse::<ScorerKind>(), Ok(ScorerKind::Preference));
        assert!("random".parse::<ScorerKind>().is_err());
    }

    #[test]
    fn eta_tick_never_zero() {
        let mut config = Config::for_tests();
        config.eta_tick_secs = 0;
        assert_eq!(config.eta_tick(), Duration::from_secs(1));
    }
}
