use crate::ledger::{Block, DEFAULT_DIFFICULTY_PREFIX, Ledger, Transfer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Shared application state with the in-memory ledger.
///
/// One coarse lock guards all mutable ledger state; every handler holds
/// it for its whole operation (including the proof-of-work search during
/// mining) so settlement reads and the chain/snapshot write commit as
/// one unit.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
}

impl AppState {
    pub fn with_difficulty(difficulty_prefix: &str) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(difficulty_prefix)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_difficulty(DEFAULT_DIFFICULTY_PREFIX)
    }
}

/* ---------- Instruction API Models ---------- */

#[derive(Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct DepositRequest {
    pub receiver: String,
    pub amount: f64,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

/// Flat block payload returned by mine and hack, message first.
#[derive(Serialize, Deserialize)]
pub struct BlockResponse {
    pub message: String,
    pub index: u64,
    pub timestamp: i64,
    pub nonce: u64,
    pub previous_hash: String,
    pub hash: String,
    pub balances: BTreeMap<String, f64>,
    pub transactions: Vec<Transfer>,
}

impl BlockResponse {
    pub fn new(message: &str, block: &Block) -> Self {
        Self {
            message: message.to_string(),
            index: block.index,
            timestamp: block.timestamp,
            nonce: block.nonce,
            previous_hash: block.previous_hash.clone(),
            hash: block.hash.clone(),
            balances: block.balances.clone(),
            transactions: block.transactions.clone(),
        }
    }
}

/* ---------- Generic API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
