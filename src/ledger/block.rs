use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A transfer, either waiting in the pending buffer or sealed into a block.
///
/// `index` is the 1-based position within the pending buffer at creation
/// time; it resets whenever a block seals. `amount` is not checked against
/// any balance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub index: u64,
    pub timestamp: f64,
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

/// An immutable, sealed unit of the chain.
///
/// `previous_hash` is the hex digest of the predecessor's canonical form,
/// or the `"genesis"` sentinel for block 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// SHA-256 of this block's canonical JSON form, as 64 lowercase hex chars.
    pub fn hash(&self) -> String {
        sha256_hex(&canonical_json(self))
    }
}

/// Current wall-clock time as fractional Unix seconds.
pub fn unix_time() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}

/// Serialize `value` as canonical JSON: object keys sorted lexicographically
/// at every nesting level, so the bytes depend on semantic content only.
///
/// Routing through `serde_json::Value` does the sorting, since its object
/// type iterates in key order. The ledger and the worker both hash through
/// this function; if their bytes ever diverged, every proof found by one
/// side would be rejected by the other.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .expect("serialize to json value")
        .to_string()
}

/// Lowercase hex SHA-256 digest of a string.
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}
