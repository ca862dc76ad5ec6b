use std::collections::BTreeMap;
use std::mem;

use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;

use super::block::{Block, Transfer};
use super::error::LedgerError;
use super::{GENESIS_PREVIOUS_HASH, encode, pow, validate};

/// Simple in-memory proof-of-work ledger.
///
/// Owns the chain, the snapshot retained for integrity comparison, and
/// the pending transfer/deposit queues. All state lives in process
/// memory for the lifetime of the instance.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    snapshot: Vec<Block>,
    difficulty_prefix: String,
    pending_transfers: Vec<Transfer>,
    pending_deposits: BTreeMap<String, f64>,
}

impl Ledger {
    /// Initialize a new ledger: mine the genesis block and capture the
    /// first snapshot.
    pub fn new(difficulty_prefix: impl Into<String>) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            snapshot: Vec::new(),
            difficulty_prefix: difficulty_prefix.into(),
            pending_transfers: Vec::new(),
            pending_deposits: BTreeMap::new(),
        };
        let genesis = ledger.seal_block(
            BTreeMap::new(),
            Vec::new(),
            GENESIS_PREVIOUS_HASH.to_string(),
        );
        info!("genesis sealed (hash={}, nonce={})", genesis.hash, genesis.nonce);
        ledger.chain.push(genesis);
        ledger.snapshot = ledger.chain.clone();
        ledger
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn snapshot(&self) -> &[Block] {
        &self.snapshot
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// The index the next mined block would carry.
    fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    /// Queue a transfer for the next block. Returns the index that
    /// block would have if mined now; balances are untouched until then.
    pub fn enqueue_transfer(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) -> Result<u64, LedgerError> {
        if sender.is_empty() || receiver.is_empty() {
            return Err(LedgerError::InvalidTransfer("empty account identifier"));
        }
        if sender == receiver {
            return Err(LedgerError::InvalidTransfer(
                "sender cannot be the same as receiver",
            ));
        }
        if amount <= 0.0 {
            return Err(LedgerError::InvalidTransfer(
                "amount must be greater than zero",
            ));
        }
        self.pending_transfers.push(Transfer {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount,
        });
        debug!(
            "queued transfer {} -> {} ({}), {} pending",
            sender,
            receiver,
            amount,
            self.pending_transfers.len()
        );
        Ok(self.next_index())
    }

    /// Queue a deposit for the next block. A second deposit for the
    /// same receiver before the next mint overwrites the first rather
    /// than accumulating.
    pub fn enqueue_deposit(&mut self, receiver: &str, amount: f64) -> Result<u64, LedgerError> {
        if amount <= 0.0 {
            return Err(LedgerError::InvalidDeposit(
                "amount must be greater than zero",
            ));
        }
        if let Some(previous) = self.pending_deposits.insert(receiver.to_string(), amount) {
            debug!("deposit for {receiver} overwritten ({previous} -> {amount})");
        }
        Ok(self.next_index())
    }

    /// Assemble a candidate block from pending state, settle balances,
    /// mine it and append it to the chain.
    ///
    /// Block assembly consumes the pending queues whether or not the
    /// candidate is accepted: a rejected mint loses the instructions
    /// that caused the rejection instead of leaving them queued.
    pub fn mint(&mut self) -> Result<&Block, LedgerError> {
        let transfers = mem::take(&mut self.pending_transfers);
        let deposits = mem::take(&mut self.pending_deposits);

        if !self.is_valid() {
            warn!("mint refused: chain failed integrity check");
            return Err(LedgerError::ChainInvalid);
        }

        // Base = settled balances of the last block plus pending deposits.
        let mut base = self.last_block().balances.clone();
        for (account, amount) in deposits {
            *base.entry(account).or_insert(0.0) += amount;
        }

        // Aggregate per-sender debits and per-receiver credits.
        let mut debits: BTreeMap<String, f64> = BTreeMap::new();
        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for transfer in &transfers {
            *debits.entry(transfer.sender.clone()).or_insert(0.0) += transfer.amount;
            *credits.entry(transfer.receiver.clone()).or_insert(0.0) += transfer.amount;
        }

        if base.is_empty() && !debits.is_empty() {
            warn!("mint rejected: no balances to spend against");
            return Err(LedgerError::InsufficientFunds(
                "no balances exist to spend against".to_string(),
            ));
        }

        // All-or-nothing: every sender must cover its aggregate debit
        // before anything is applied.
        for (sender, owed) in &debits {
            let available = base.get(sender).copied().unwrap_or(0.0);
            if available < *owed {
                warn!("mint rejected: {sender} owes {owed} but holds {available}");
                return Err(LedgerError::InsufficientFunds(format!(
                    "{sender} cannot cover an aggregate debit of {owed}"
                )));
            }
        }
        for (sender, owed) in &debits {
            *base.entry(sender.clone()).or_insert(0.0) -= owed;
        }
        for (receiver, gained) in credits {
            *base.entry(receiver).or_insert(0.0) += gained;
        }

        let previous_hash = self.last_block().hash.clone();
        let block = self.seal_block(base, transfers, previous_hash);
        info!(
            "sealed block #{} (hash={}, nonce={}, txs={})",
            block.index,
            block.hash,
            block.nonce,
            block.transactions.len()
        );
        self.chain.push(block);
        self.snapshot = self.chain.clone();
        Ok(self.last_block())
    }

    /// Walk the chain against the snapshot: linkage, snapshot equality
    /// and the difficulty prefix.
    pub fn is_valid(&self) -> bool {
        validate::is_chain_valid(&self.chain, &self.snapshot, &self.difficulty_prefix)
    }

    /// Overwrite a random non-genesis block's hash with a freshly mined
    /// one, simulating post-commit tampering.
    ///
    /// The new hash is a legitimate proof-of-work over the block's full
    /// current content, stored `hash` and `nonce` fields included, so it
    /// necessarily differs from the value the snapshot recorded. Neither
    /// the next block's `previous_hash` nor the snapshot is refreshed.
    /// Returns `None` when only the genesis block exists.
    pub fn tamper(&mut self) -> Option<&Block> {
        if self.chain.len() < 2 {
            return None;
        }
        let target = rand::thread_rng().gen_range(1..self.chain.len());
        let preimage = encode::canonical_bytes(&self.chain[target]);
        let (_, hash) = pow::mine(&preimage, &self.difficulty_prefix);
        warn!(
            "tampering block #{}: {} -> {}",
            self.chain[target].index, self.chain[target].hash, hash
        );
        self.chain[target].hash = hash;
        Some(&self.chain[target])
    }

    /// Mine a block over the given content and seal it.
    fn seal_block(
        &self,
        balances: BTreeMap<String, f64>,
        transactions: Vec<Transfer>,
        previous_hash: String,
    ) -> Block {
        let mut block = Block {
            index: self.next_index(),
            timestamp: Utc::now().timestamp(),
            nonce: 0,
            previous_hash,
            hash: String::new(),
            balances,
            transactions,
        };
        let content = encode::canonical_bytes(&block.content());
        let (nonce, hash) = pow::mine(&content, &self.difficulty_prefix);
        block.nonce = nonce;
        block.hash = hash;
        block
    }
}
