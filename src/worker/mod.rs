use std::thread;
use std::time::Duration;

use log::{error, info, warn};
use reqwest::blocking::Client;

use crate::api::models::{LastBlockResponse, MSG_BLOCK_FORGED, MineRequest, MineResponse};
use crate::ledger::Block;
use crate::ledger::block::canonical_json;
use crate::pow;

/// Default ledger service address when none is given on the command line.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Give up after this many consecutive transport failures.
const MAX_TRANSPORT_FAILURES: u32 = 10;

const BACKOFF_BASE: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// A mining worker bound to one ledger service.
///
/// Each loop iteration fetches the head block, brute-forces a proof for its
/// canonical form and submits it. The block is hashed exactly as received
/// over the wire, so the digest matches the ledger's own computation.
pub struct Worker {
    client: Client,
    base_url: String,
    coins_mined: u64,
}

impl Worker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            coins_mined: 0,
        }
    }

    /// Count of proofs this worker has had accepted.
    pub fn coins_mined(&self) -> u64 {
        self.coins_mined
    }

    /// Run the fetch → search → submit loop.
    ///
    /// A rejection just restarts the loop against the new head: the proof
    /// went stale because someone else forged a block first, and the next
    /// fetch picks that block up. Returns only when the service hands back
    /// a body that does not parse as a block, or when transport failures
    /// persist past the limit.
    pub fn run(&mut self) {
        let mut transport_failures = 0u32;

        loop {
            let block = match self.fetch_last_block() {
                Ok(block) => {
                    transport_failures = 0;
                    block
                }
                Err(e) if e.is_decode() => {
                    error!("service returned a body that is not a block: {e}");
                    return;
                }
                Err(e) => {
                    transport_failures += 1;
                    if transport_failures >= MAX_TRANSPORT_FAILURES {
                        error!("giving up after {transport_failures} failed fetches: {e}");
                        return;
                    }
                    let backoff = backoff_for(transport_failures);
                    warn!("fetch failed ({e}); retrying in {backoff:?}");
                    thread::sleep(backoff);
                    continue;
                }
            };

            info!("searching proof for block #{}", block.index);
            let subject = canonical_json(&block);
            let proof = pow::search(&subject);
            info!("found proof {proof} for block #{}", block.index);

            match self.submit_proof(proof) {
                Ok(resp) if resp.message == MSG_BLOCK_FORGED => {
                    self.coins_mined += 1;
                    info!("{} — {} coins mined", resp.message, self.coins_mined);
                }
                Ok(resp) => {
                    info!("{}", resp.message);
                }
                Err(e) => {
                    warn!("submit failed ({e}); refetching head");
                    thread::sleep(BACKOFF_BASE);
                }
            }
        }
    }

    fn fetch_last_block(&self) -> Result<Block, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/last_block", self.base_url))
            .send()?;
        Ok(resp.json::<LastBlockResponse>()?.last_block)
    }

    fn submit_proof(&self, proof: u64) -> Result<MineResponse, reqwest::Error> {
        self.client
            .post(format!("{}/mine", self.base_url))
            .json(&MineRequest { proof })
            .send()?
            .json()
    }
}

/// Exponential backoff for the n-th consecutive failure, capped.
fn backoff_for(failures: u32) -> Duration {
    BACKOFF_BASE
        .saturating_mul(1 << failures.saturating_sub(1).min(5))
        .min(BACKOFF_CAP)
}
