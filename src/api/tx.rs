use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, MSG_TX_FAILED, NewTransactionRequest, TransactionResponse};
use crate::ledger::SYSTEM_SENDER;

/// Queue a mining-reward transaction for the submitted recipient id.
///
/// The chain itself is untouched; the transaction waits in the pending
/// buffer until the next block seals. A blank id is the one recording
/// failure this service can hit, reported with a generic message and no
/// partial buffer mutation.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    req: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let recipient = req.id.trim();
    if recipient.is_empty() {
        warn!("transaction rejected: blank recipient id");
        return HttpResponse::BadRequest().json(TransactionResponse {
            message: MSG_TX_FAILED.to_string(),
        });
    }

    let block_index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.new_transaction(SYSTEM_SENDER, recipient, 1)
    };

    info!("transaction for {recipient} queued for block #{block_index}");
    HttpResponse::Ok().json(TransactionResponse {
        message: format!("Transaction added to block #{block_index}"),
    })
}
