pub mod block;
pub mod model;

pub use block::{Block, Transaction};
pub use model::Ledger;

/// Proof recorded in the genesis block (a fixed seed, never mined).
pub const GENESIS_PROOF: u64 = 100;

/// Previous-hash sentinel for the genesis block, which has no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "genesis";

/// Sender recorded on transactions the system issues itself (mining rewards).
pub const SYSTEM_SENDER: &str = "0";
