use log::debug;

use super::block::{Block, Transaction, unix_time};
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

/// The append-only chain plus the pending-transaction buffer.
///
/// Linkage and index invariants hold by construction; nothing here
/// re-validates them after the fact.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Create a ledger with its genesis block already sealed, so the chain
    /// is never observably empty.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.new_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// Queue a transaction for the next block. Returns the chain index that
    /// block will take — indicative only, since more transactions may join
    /// the buffer before it seals.
    pub fn new_transaction(&mut self, sender: &str, recipient: &str, amount: u64) -> u64 {
        let transaction = Transaction {
            index: self.pending.len() as u64 + 1,
            timestamp: unix_time(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        };
        self.pending.push(transaction);
        self.chain.len() as u64 + 1
    }

    /// Seal the pending buffer into a new block and append it.
    ///
    /// This is a pure commit primitive: the proof is recorded, not checked —
    /// callers validate before committing. `previous_hash` defaults to the
    /// hash of the current last block when absent.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: unix_time(),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        debug!(
            "sealed block #{} with {} transactions",
            block.index,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// The most recently appended block.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::Ledger;
    use crate::ledger::block::{canonical_json, sha256_hex};
    use crate::ledger::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, SYSTEM_SENDER};
    use crate::pow;

    #[test]
    fn genesis_is_sealed_at_construction() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);

        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.transactions.is_empty());
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn new_transaction_queues_without_touching_chain() {
        let mut ledger = Ledger::new();
        let next_index = ledger.new_transaction(SYSTEM_SENDER, "alice", 5);

        assert_eq!(next_index, 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending().len(), 1);

        let tx = &ledger.pending()[0];
        assert_eq!(tx.index, 1);
        assert_eq!(tx.sender, "0");
        assert_eq!(tx.recipient, "alice");
        assert_eq!(tx.amount, 5);
    }

    #[test]
    fn sealing_drains_pending_and_restarts_indices() {
        let mut ledger = Ledger::new();
        ledger.new_transaction("0", "alice", 1);
        ledger.new_transaction("0", "bob", 2);

        let block = ledger.new_block(7, None);
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].index, 1);
        assert_eq!(block.transactions[1].index, 2);
        assert!(ledger.pending().is_empty());

        // Buffer indices restart after a seal, even one with an empty buffer.
        ledger.new_block(8, None);
        ledger.new_transaction("0", "carol", 3);
        assert_eq!(ledger.pending()[0].index, 1);
    }

    #[test]
    fn blocks_link_to_their_predecessor_hash() {
        let mut ledger = Ledger::new();
        ledger.new_block(7, None);
        ledger.new_block(8, None);
        ledger.new_block(9, None);

        let chain = ledger.chain();
        for (i, block) in chain.iter().enumerate() {
            assert_eq!(block.index, i as u64 + 1);
            if i > 0 {
                assert_eq!(block.previous_hash, chain[i - 1].hash());
            }
        }
    }

    #[test]
    fn concurrent_commits_admit_exactly_one() {
        let ledger = Arc::new(Mutex::new(Ledger::new()));

        // One genuinely valid proof for the current head, one that is not.
        let (good, bad) = {
            let ledger = ledger.lock().unwrap();
            let subject = canonical_json(ledger.last_block());
            let good = pow::search(&subject);
            let bad = (0u64..).find(|&p| !pow::is_valid(&subject, p)).unwrap();
            (good, bad)
        };

        let mut handles = Vec::new();
        for proof in [good, bad] {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                // Same validate-then-commit sequence the mine handler runs,
                // under one lock so the admission test sees the commit-time
                // head.
                let mut ledger = ledger.lock().unwrap();
                let subject = canonical_json(ledger.last_block());
                if pow::is_valid(&subject, proof) {
                    ledger.new_block(proof, Some(sha256_hex(&subject)));
                    true
                } else {
                    false
                }
            }));
        }

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(ledger.lock().unwrap().len(), 2);
    }
}
