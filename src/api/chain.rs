use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, LastBlockResponse};

/// Get the full chain and its length.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Get the most recently sealed block.
#[get("/last_block")]
pub async fn get_last_block(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(LastBlockResponse {
        last_block: ledger.last_block().clone(),
    })
}
