use crate::generator::TransactionGenerator;
use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Keep transactions in process memory instead of PostgreSQL.
    pub in_memory: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: "localhost".to_string(),
            user: "flask_user".to_string(),
            password: "flask_password".to_string(),
            name: "dataset_db".to_string(),
            max_connections: 10,
            in_memory: false,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PaginationConfig {
    /// The page shown when a request does not ask for one.
    pub default_page: i64,
    /// The page size used when a request does not ask for one.
    pub default_per_page: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            default_page: 1,
            default_per_page: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub generator: TransactionGenerator,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5001,
            database: DatabaseConfig::default(),
            pagination: PaginationConfig::default(),
            generator: TransactionGenerator::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Config::from_toml(config.as_str())
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).with_context(|| "Unable to parse config")?;
        config
            .generator
            .validate()
            .context("Invalid generator config")?;
        Ok(config)
    }

    /// Builds the config from environment variables, using the defaults for unset variables.
    pub fn from_env() -> Result<Config, anyhow::Error> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or(defaults.database.host),
            user: lookup("DB_USER").unwrap_or(defaults.database.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.database.password),
            name: lookup("DB_NAME").unwrap_or(defaults.database.name),
            max_connections: parse_var(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.database.max_connections,
            )?,
            in_memory: parse_var(&lookup, "DB_IN_MEMORY", defaults.database.in_memory)?,
        };
        let pagination = PaginationConfig {
            default_page: defaults.pagination.default_page,
            default_per_page: parse_var(
                &lookup,
                "DEFAULT_PER_PAGE",
                defaults.pagination.default_per_page,
            )?,
        };

        Ok(Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            database,
            pagination,
            generator: defaults.generator,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Unable to parse {} value", key)),
        None => Ok(default),
    }
}
