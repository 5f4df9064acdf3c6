use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info};

use super::models::{AppState, MSG_BLOCK_FORGED, MSG_PROOF_REJECTED, MineRequest, MineResponse};
use crate::ledger::block::{canonical_json, sha256_hex};
use crate::pow;

/// Submit a candidate proof.
///
/// The proof is validated against whatever the head is at commit time, and
/// the lock spans validate + commit, so two submissions racing for the same
/// head cannot both land — the loser's proof is stale on arrival and gets
/// the rejection message. Rejection leaves the ledger untouched.
#[post("/mine")]
pub async fn mine(state: web::Data<AppState>, req: web::Json<MineRequest>) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");

    let subject = canonical_json(ledger.last_block());
    if !pow::is_valid(&subject, req.proof) {
        debug!(
            "rejected proof {} against block #{}",
            req.proof,
            ledger.last_block().index
        );
        return HttpResponse::Ok().json(MineResponse {
            message: MSG_PROOF_REJECTED.to_string(),
            new_block: None,
        });
    }

    let previous_hash = sha256_hex(&subject);
    let block = ledger.new_block(req.proof, Some(previous_hash)).clone();
    info!("forged block #{} (proof={})", block.index, req.proof);

    HttpResponse::Ok().json(MineResponse {
        message: MSG_BLOCK_FORGED.to_string(),
        new_block: Some(block),
    })
}
