use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::sync::Arc;
use std::{env, fs};
use txn_repo::transaction_repo::TransactionRepo;

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[allow(dead_code)]
#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub async fn build_repo(repo_type: RepoType) -> Arc<dyn TransactionRepo> {
    match repo_type {
        RepoType::SQLx => txn_repo::sqlx_repo::create_repo(test_connect_options(), 1)
            .await
            .unwrap(),
        RepoType::Mem => txn_repo::mem_repo::create_repo(),
    }
}

/// Reads the test database from `TEST_DATABASE_URL`, falling back to `config_test.toml`.
fn test_connect_options() -> PgConnectOptions {
    let database_url = match env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            let config = fs::read_to_string("config_test.toml").unwrap();
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            config.database_url
        }
    };
    database_url.parse().unwrap()
}
