use crate::dataset::DatasetFetcher;
use crate::error::HandlerError;
use crate::generator::TransactionGenerator;
use crate::tracing::record_count;
use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use txn_repo::transaction_repo::TransactionRepo;

#[derive(Deserialize)]
pub struct UploadRequest {
    url: Option<String>,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

#[post("/upload")]
pub async fn upload_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    dataset_fetcher: web::Data<Arc<dyn DatasetFetcher>>,
    upload_request: web::Json<UploadRequest>,
) -> Result<impl Responder, HandlerError> {
    let url = match upload_request.into_inner().url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(HandlerError::BadRequest("No URL provided".to_string())),
    };

    let new_transactions = dataset_fetcher
        .fetch_transactions(&url)
        .await
        .map_err(|e| {
            warn!(%url, error = %e, "Unable to fetch dataset");
            HandlerError::from(e)
        })?;

    let inserted = transaction_repo
        .create_new_transactions(new_transactions)
        .await?;
    info!(%url, inserted, "Uploaded transactions");
    record_count(inserted as usize);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Data uploaded successfully!"
    })))
}

#[get("/transactions")]
pub async fn get_all_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo.get_all_transactions(None).await?;
    record_count(transactions.len());
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/transactions/delete")]
pub async fn delete_all_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
) -> Result<impl Responder, HandlerError> {
    let deleted = transaction_repo.delete_all_transactions().await?;
    info!(deleted, "Deleted all transactions");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("success"))
}

#[get("/transactions/range")]
pub async fn get_transactions_in_range(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    range: web::Query<RangeQuery>,
) -> Result<impl Responder, HandlerError> {
    let range = range.into_inner();
    let from = parse_date_param(range.start_date)?;
    let until = parse_date_param(range.end_date)?;

    let transactions = transaction_repo
        .get_transactions_in_range(from, until)
        .await?;
    record_count(transactions.len());
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/transaction/{transaction_id}")]
pub async fn get_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    transaction_id: web::Path<String>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .get_transaction(&transaction_id.into_inner())
        .await?
        .ok_or_else(|| HandlerError::NotFound("Transaction not found".to_string()))?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[get("/generate/{num_transactions}")]
pub async fn generate_transactions(
    generator: web::Data<TransactionGenerator>,
    num_transactions: web::Path<usize>,
) -> impl Responder {
    let transactions = generator.generate(num_transactions.into_inner());
    record_count(transactions.len());
    HttpResponse::Ok().json(transactions)
}

/// Empty values count as missing.
fn parse_date_param(value: Option<String>) -> Result<Option<NaiveDate>, HandlerError> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                HandlerError::BadRequest(format!("Invalid date {}, expected YYYY-MM-DD", s))
            }),
    }
}
