use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::ledger::{Block, Ledger};

/// Message on a successful mine; the worker matches on it verbatim.
pub const MSG_BLOCK_FORGED: &str = "New Block Forged";

/// Message for a proof that fails validation against the current head.
pub const MSG_PROOF_REJECTED: &str = "Nope nope nope nope nope. Try again.";

/// Generic message for a transaction the service could not record.
pub const MSG_TX_FAILED: &str = "Something went wrong. Please try again";

/// Shared application state: one ledger for the process lifetime.
///
/// A single mutex guards both the chain and the pending buffer, so mutating
/// requests serialize against each other and reads always see a whole
/// snapshot.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
        }
    }
}

/* ---------- Mine API models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct MineRequest {
    pub proof: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_block: Option<Block>,
}

/* ---------- Transaction API models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct NewTransactionRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub message: String,
}

/* ---------- Chain API models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LastBlockResponse {
    pub last_block: Block,
}
