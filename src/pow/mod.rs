use std::sync::atomic::{AtomicBool, Ordering};

use crate::ledger::block::sha256_hex;

/// Number of leading zero hex characters a valid proof's hash must carry.
///
/// The search side and the validation side both read this one constant, so
/// a worker can never end up hunting for a different target than the ledger
/// demands.
pub const DIFFICULTY: usize = 3;

/// True iff SHA-256 of `subject` followed by the decimal form of `proof`
/// yields a digest with [`DIFFICULTY`] leading zero characters.
///
/// Pure: same inputs, same answer, across calls and across processes.
pub fn is_valid(subject: &str, proof: u64) -> bool {
    let digest = sha256_hex(&format!("{subject}{proof}"));
    digest.chars().take(DIFFICULTY).all(|c| c == '0')
}

/// Brute-force the smallest proof valid for `subject`, counting up from
/// zero. Unbounded: termination is probabilistic, expected after about
/// 16^DIFFICULTY attempts with a well-distributed hash.
pub fn search(subject: &str) -> u64 {
    (0u64..)
        .find(|&proof| is_valid(subject, proof))
        .expect("proof space exhausted")
}

/// Like [`search`], but abandons the hunt and returns `None` once `cancel`
/// is raised. The flag is polled between attempts.
pub fn search_interruptible(subject: &str, cancel: &AtomicBool) -> Option<u64> {
    (0u64..)
        .take_while(|_| !cancel.load(Ordering::Relaxed))
        .find(|&proof| is_valid(subject, proof))
}
