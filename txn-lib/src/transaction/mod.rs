use actix_web::{web, Scope};

mod handlers;

pub use handlers::upload_transactions;

pub fn transaction_api_service() -> Scope {
    web::scope("/api")
        .service(handlers::get_all_transactions)
        .service(handlers::delete_all_transactions)
        .service(handlers::get_transactions_in_range)
        .service(handlers::get_transaction)
        .service(handlers::generate_transactions)
}
