//! The paginated HTML table of stored transactions served at `/`.

use crate::config::PaginationConfig;
use crate::error::HandlerError;
use crate::tracing::record_count;
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse};
use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;
use std::sync::Arc;
use txn_repo::pagination::{paginate, Pagination};
use txn_repo::transaction_repo::{Transaction, TransactionRepo};

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

#[get("/")]
pub async fn index_page(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    pagination_config: web::Data<PaginationConfig>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, HandlerError> {
    let page = query.page.unwrap_or(pagination_config.default_page);
    let per_page = query.per_page.unwrap_or(pagination_config.default_per_page);

    let total_records = transaction_repo.count_transactions().await?;
    let pagination = paginate(total_records, page, per_page);
    let transactions = transaction_repo
        .get_all_transactions(Some(pagination.page_options()))
        .await?;
    record_count(transactions.len());

    let markup = transactions_view(&transactions, &pagination, total_records);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(markup.into_string()))
}

fn page_link(page: i64, per_page: i64) -> String {
    format!("/?page={}&per_page={}", page, per_page)
}

fn transactions_view(
    transactions: &[Transaction],
    pagination: &Pagination,
    total_records: i64,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Transactions" }
            }
            body {
                h1 { "Transactions" }
                p id="summary" {
                    "Page " (pagination.page) " of " (pagination.total_pages)
                    " (" (total_records) " records)"
                }
                table id="transactions" {
                    thead {
                        tr {
                            th { "Date" }
                            th { "Transaction ID" }
                            th { "Item" }
                            th { "Amount" }
                            th { "Location" }
                        }
                    }
                    tbody {
                        @for transaction in transactions {
                            tr {
                                td { (transaction.date.format("%Y-%m-%d")) }
                                td { (transaction.transaction_id) }
                                td { (transaction.item) }
                                td { (format!("{:.2}", transaction.amount)) }
                                td { (transaction.location) }
                            }
                        }
                    }
                }
                nav id="pagination" {
                    @if pagination.has_previous() {
                        a id="previous" href=(page_link(pagination.page - 1, pagination.per_page)) {
                            "Previous"
                        }
                    }
                    " "
                    @if pagination.has_next() {
                        a id="next" href=(page_link(pagination.page + 1, pagination.per_page)) {
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
