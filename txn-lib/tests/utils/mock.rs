use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use txn_lib::dataset::{parse_dataset, DatasetFetcher, FetchError};
use txn_repo::transaction_repo::{
    PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};

#[allow(dead_code)]
pub enum StubResponse {
    Body(&'static str),
    Status(u16),
    Unreachable,
}

/// Serves canned dataset responses keyed by URL. Unknown URLs are unreachable.
pub struct StubDatasetFetcher {
    responses: HashMap<String, StubResponse>,
}

#[allow(dead_code)]
impl StubDatasetFetcher {
    pub fn new() -> Self {
        StubDatasetFetcher {
            responses: HashMap::new(),
        }
    }

    pub fn with(mut self, url: &str, response: StubResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn into_arc(self) -> Arc<dyn DatasetFetcher> {
        Arc::new(self)
    }
}

#[async_trait]
impl DatasetFetcher for StubDatasetFetcher {
    async fn fetch_transactions(&self, url: &str) -> Result<Vec<Transaction>, FetchError> {
        match self.responses.get(url) {
            Some(StubResponse::Body(body)) => parse_dataset(body.as_bytes()),
            Some(StubResponse::Status(status)) => Err(FetchError::UnsuccessfulStatus(*status)),
            Some(StubResponse::Unreachable) | None => {
                Err(anyhow!("error sending request for url ({})", url).into())
            }
        }
    }
}

/// Repo whose every operation fails as if the database were down.
pub struct UnavailableRepo;

fn unavailable() -> TransactionRepoError {
    TransactionRepoError::Storage(anyhow!("connection refused"))
}

#[async_trait]
impl TransactionRepo for UnavailableRepo {
    async fn count_transactions(&self) -> Result<i64, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_all_transactions(
        &self,
        _page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_transaction(
        &self,
        _transaction_id: &str,
    ) -> Result<Option<Transaction>, TransactionRepoError> {
        Err(unavailable())
    }

    async fn get_transactions_in_range(
        &self,
        _from: Option<NaiveDate>,
        _until: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        Err(unavailable())
    }

    async fn create_new_transaction(
        &self,
        _transaction: Transaction,
    ) -> Result<Transaction, TransactionRepoError> {
        Err(unavailable())
    }

    async fn create_new_transactions(
        &self,
        _transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        Err(unavailable())
    }

    async fn delete_all_transactions(&self) -> Result<u64, TransactionRepoError> {
        Err(unavailable())
    }
}
