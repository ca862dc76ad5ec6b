use thiserror::Error;

/// Caller-correctable input errors reported by the ledger engine.
///
/// None of these are fatal: a failed operation leaves the chain and
/// snapshot untouched (though a failed mint still drains the pending
/// queues, see `Ledger::mint`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Self-transfer, empty account identifier, or non-positive amount.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(&'static str),

    /// Non-positive deposit amount.
    #[error("invalid deposit: {0}")]
    InvalidDeposit(&'static str),

    /// Mint attempted while the chain fails its integrity check.
    #[error("chain failed integrity check")]
    ChainInvalid,

    /// Aggregate debit exceeds some sender's available balance, or no
    /// balances exist to spend against.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
}
