use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument};
use txn_repo::transaction_repo::Transaction;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Dataset URL responded with status {0}")]
    UnsuccessfulStatus(u16),
    #[error("Dataset is not a list of transactions: {0}")]
    InvalidDataset(String),
    #[error(transparent)]
    Request(#[from] anyhow::Error),
}

/// Downloads a JSON array of transactions from a URL.
#[async_trait]
pub trait DatasetFetcher: Sync + Send {
    async fn fetch_transactions(&self, url: &str) -> Result<Vec<Transaction>, FetchError>;
}

pub struct HttpDatasetFetcher {
    client: reqwest::Client,
}

impl HttpDatasetFetcher {
    pub fn new() -> HttpDatasetFetcher {
        HttpDatasetFetcher {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpDatasetFetcher {
    fn default() -> Self {
        HttpDatasetFetcher::new()
    }
}

#[async_trait]
impl DatasetFetcher for HttpDatasetFetcher {
    #[instrument(skip(self))]
    async fn fetch_transactions(&self, url: &str) -> Result<Vec<Transaction>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Unable to download {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnsuccessfulStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Unable to read response body from {}", url))?;
        info!(bytes = body.len(), "Downloaded dataset");

        parse_dataset(&body)
    }
}

/// Parses a dataset body. Every record must have all transaction fields; extra fields are ignored.
pub fn parse_dataset(body: &[u8]) -> Result<Vec<Transaction>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::InvalidDataset(e.to_string()))
}
