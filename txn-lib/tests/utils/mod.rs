use rstest::*;
use std::sync::Arc;
use tracing::info;
use tracing::Level;
use txn_repo::transaction_repo::{Transaction, TransactionRepo};

pub mod mock;

macro_rules! build_app {
    ($transaction_repo:expr, $dataset_fetcher:expr) => {{
        let app = App::new()
            .wrap(txn_lib::tracing::create_middleware())
            .configure(txn_lib::app_config_func(
                $transaction_repo,
                $dataset_fetcher,
                txn_lib::generator::TransactionGenerator::default(),
                txn_lib::config::PaginationConfig::default(),
            ));
        tracing::info!("Built app");
        app
    }};
    ($transaction_repo:expr) => {{
        build_app!(
            $transaction_repo,
            crate::utils::mock::StubDatasetFetcher::new().into_arc()
        )
    }};
}

#[allow(unused_macros)]
macro_rules! upload {
    (&$service:ident, $url:expr) => {{
        let request = TestRequest::post()
            .uri("/upload")
            .set_json(serde_json::json!({ "url": $url }))
            .to_request();
        test::call_service(&$service, request).await
    }};
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn transaction_repo() -> Arc<dyn TransactionRepo> {
    txn_repo::mem_repo::create_repo()
}

#[allow(dead_code)]
pub fn transaction(date: &str, transaction_id: &str, amount: &str) -> Transaction {
    Transaction::new(
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        transaction_id.to_string(),
        "Keyboard".to_string(),
        amount.parse().unwrap(),
        "Chicago".to_string(),
    )
}

/// One transaction per day starting at 2024-01-01, with ids `T001`, `T002`, ...
#[allow(dead_code)]
pub fn daily_transactions(count: usize) -> Vec<Transaction> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            transaction(
                &date.format("%Y-%m-%d").to_string(),
                &format!("T{:03}", i + 1),
                "25.00",
            )
        })
        .collect()
}
