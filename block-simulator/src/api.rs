use crate::{
    error::ServiceError,
    models::mempool::{SubmitTxRequest, SubmitTxResponse},
    orchestrator::Orchestrator,
    pricing::PriceQuoteService,
    simulator::BlockSimulator,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Largest accepted `/simulateBlock` body; batches are not size-capped
pub const MAX_PAYLOAD_BYTES: usize = usize::MAX;

/// Encode a body as JSON, surfacing encoder failures as a server error
fn json_response<T: Serialize>(body: &T) -> Result<HttpResponse, ServiceError> {
    let encoded = serde_json::to_vec(body)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(encoded))
}

/// Return a freshly randomized gas price and fee
#[get("/getCurrentPrice")]
async fn get_current_price(
    pricing: web::Data<Arc<PriceQuoteService>>,
) -> Result<HttpResponse, ServiceError> {
    json_response(&pricing.quote())
}

/// Simulate processing a block from the submitted transaction batch
///
/// The body is taken as raw bytes so decoding happens inside the gated
/// section rather than in an extractor ahead of it.
#[post("/simulateBlock")]
async fn simulate_block(
    req: HttpRequest,
    simulator: web::Data<Arc<BlockSimulator>>,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    debug!(
        "Received block simulation request from {}",
        req.peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    let result = simulator.simulate(&body).await?;
    json_response(&result)
}

/// Liveness probe that also reports whether a simulation is in flight
#[get("/health")]
async fn health_check(simulator: web::Data<Arc<BlockSimulator>>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "busy": simulator.gate().is_busy(),
    }))
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
       .service(get_current_price)
       .service(simulate_block)
       .service(health_check);
}

/// Price a transaction with the current quote and queue it in the mempool
#[post("/transactions")]
async fn submit_transaction(
    orchestrator: web::Data<Arc<Orchestrator>>,
    request: web::Json<SubmitTxRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = match request.into_inner().id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Ok(HttpResponse::BadRequest().finish()),
    };

    let tx = orchestrator.accept(id).await?;
    info!(id = %tx.id, gas_price = tx.gas_price, fee = tx.fee, "Transaction accepted");
    json_response(&SubmitTxResponse { accepted: true, tx })
}

/// Mempool size and submission counters
#[get("/stats")]
async fn stats(orchestrator: web::Data<Arc<Orchestrator>>) -> Result<HttpResponse, ServiceError> {
    json_response(&orchestrator.stats())
}

/// Configure the mempool routes
pub fn configure_mempool(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_transaction)
       .service(stats);
}
