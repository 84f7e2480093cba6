use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder, TracingLogger};

pub struct TxnRootSpanBuilder;

impl RootSpanBuilder for TxnRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        tracing_actix_web::root_span!(request, record_count = tracing::field::Empty)
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

pub fn create_middleware() -> TracingLogger<TxnRootSpanBuilder> {
    TracingLogger::<TxnRootSpanBuilder>::new()
}

/// Records how many transactions the current request returned or stored.
pub fn record_count(count: usize) {
    Span::current().record("record_count", count);
}
