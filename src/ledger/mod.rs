pub mod block;
pub mod encode;
pub mod error;
pub mod model;
pub mod pow;
pub mod validate;

pub use block::{Block, Transfer};
pub use error::LedgerError;
pub use model::Ledger;

/// Default Proof-of-Work difficulty: required leading hex characters of
/// every block hash. Five characters means ~16^5 expected attempts.
pub const DEFAULT_DIFFICULTY_PREFIX: &str = "00000";

/// `previous_hash` of the genesis block (64 zero characters, the width
/// of a hex-encoded SHA-256 digest).
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";
