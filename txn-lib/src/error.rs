use crate::dataset::FetchError;
use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;
use txn_repo::transaction_repo::TransactionRepoError;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to download data from the URL")]
    UpstreamFetchFailure,
    #[error("{0}")]
    InvalidDataset(String),
    #[error("Unable to download data: {0:#}")]
    Fetch(anyhow::Error),
    #[error("{0:#}")]
    Storage(anyhow::Error),
}

impl From<TransactionRepoError> for HandlerError {
    fn from(e: TransactionRepoError) -> Self {
        match e {
            TransactionRepoError::InvalidArgument(message) => {
                HandlerError::BadRequest(message.to_string())
            }
            TransactionRepoError::Storage(e) => HandlerError::Storage(e),
        }
    }
}

impl From<FetchError> for HandlerError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::UnsuccessfulStatus(_) => HandlerError::UpstreamFetchFailure,
            FetchError::InvalidDataset(_) => HandlerError::InvalidDataset(e.to_string()),
            FetchError::Request(e) => HandlerError::Fetch(e),
        }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::BadRequest(_)
            | HandlerError::UpstreamFetchFailure
            | HandlerError::InvalidDataset(_) => StatusCode::BAD_REQUEST,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Fetch(_) | HandlerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        HttpResponse::build(status).json(serde_json::json!({ "error": self.to_string() }))
    }
}
