use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A transfer instruction between two accounts, pending until it is
/// included in a mined block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

/// A single block in the chain.
///
/// `balances` is the settled ledger state *after* this block; `index` is
/// 1-based (the genesis block has index 1 at chain position 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC), informational only
    pub nonce: u64,
    pub previous_hash: String,
    pub hash: String,
    pub balances: BTreeMap<String, f64>,
    pub transactions: Vec<Transfer>,
}

/// Hash preimage view of a block: every field except the cached `hash`
/// and the `nonce`. The proof-of-work search appends the candidate nonce
/// in decimal, so re-encoding this view with a block's stored nonce
/// reproduces its stored hash.
#[derive(Serialize)]
pub struct BlockContent<'a> {
    pub index: u64,
    pub timestamp: i64,
    pub previous_hash: &'a str,
    pub balances: &'a BTreeMap<String, f64>,
    pub transactions: &'a [Transfer],
}

impl Block {
    /// The content this block's hash commits to.
    pub fn content(&self) -> BlockContent<'_> {
        BlockContent {
            index: self.index,
            timestamp: self.timestamp,
            previous_hash: &self.previous_hash,
            balances: &self.balances,
            transactions: &self.transactions,
        }
    }
}
