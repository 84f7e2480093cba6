use crate::config::PaginationConfig;
use crate::dataset::DatasetFetcher;
use crate::generator::TransactionGenerator;
use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::web::{Data, ServiceConfig};
use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use txn_repo::transaction_repo::TransactionRepo;

pub mod config;
pub mod dataset;
mod error;
pub mod generator;
mod index;
pub mod tracing;
pub mod transaction;

pub use error::HandlerError;

/// Registers every route together with the state the handlers need.
pub fn app_config_func(
    transaction_repo: Arc<dyn TransactionRepo>,
    dataset_fetcher: Arc<dyn DatasetFetcher>,
    generator: TransactionGenerator,
    pagination: PaginationConfig,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(Data::new(transaction_repo))
            .app_data(Data::new(dataset_fetcher))
            .app_data(Data::new(generator))
            .app_data(Data::new(pagination))
            .app_data(json_config())
            .app_data(query_config())
            .service(index::index_page)
            .service(transaction::upload_transactions)
            .service(transaction::transaction_api_service());
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        ::tracing::error!(req_path = req.path(), %err);
        match err {
            JsonPayloadError::Deserialize(deserialize_err) => {
                let response = bad_request("Unable to parse JSON payload", &deserialize_err);
                InternalError::from_response(deserialize_err, response).into()
            }
            _ => err.into(),
        }
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req: &HttpRequest| {
        ::tracing::warn!(req_path = req.path(), %err);
        match err {
            QueryPayloadError::Deserialize(deserialize_err) => {
                let response = bad_request("Invalid query string", &deserialize_err);
                InternalError::from_response(deserialize_err, response).into()
            }
            _ => err.into(),
        }
    })
}

fn bad_request(error: &str, detail: &dyn std::fmt::Display) -> HttpResponse {
    let error_body = serde_json::json!({
        "error": error,
        "detail": detail.to_string(),
    });
    HttpResponse::BadRequest()
        .content_type("application/json")
        .body(error_body.to_string())
}
