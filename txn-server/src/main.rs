#[macro_use]
extern crate tracing;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use txn_lib::config::Config;
use txn_lib::dataset::{DatasetFetcher, HttpDatasetFetcher};
use txn_repo::transaction_repo::TransactionRepo;

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    tracing::subscriber::set_global_default(subscriber).context("Unable to set up tracing")?;
    info!("tracing initialized");

    let config = match get_config_file() {
        Some(config_path) => {
            info!(config_path = %config_path.display(), "Loading config file");
            Config::from_file(config_path)?
        }
        None => {
            info!("No config file found, reading config from environment");
            Config::from_env()?
        }
    };

    let transaction_repo: Arc<dyn TransactionRepo> = if config.database.in_memory {
        warn!("Using in-memory storage, transactions will be lost on shutdown");
        txn_repo::mem_repo::create_repo()
    } else {
        info!(
            host = %config.database.host,
            database = %config.database.name,
            "Connecting to database"
        );
        txn_repo::sqlx_repo::create_repo(
            config.database.connect_options(),
            config.database.max_connections,
        )
        .await?
    };
    let dataset_fetcher: Arc<dyn DatasetFetcher> = Arc::new(HttpDatasetFetcher::new());

    let generator = config.generator;
    let pagination = config.pagination;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(txn_lib::tracing::create_middleware())
            .configure(txn_lib::app_config_func(
                transaction_repo.clone(),
                dataset_fetcher.clone(),
                generator.clone(),
                pagination.clone(),
            ))
    })
    .bind(("0.0.0.0", config.port))
    .with_context(|| format!("Unable to bind port {}", config.port))?;

    info!(port = config.port, "Listening");
    server.run().await?;

    Ok(())
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
