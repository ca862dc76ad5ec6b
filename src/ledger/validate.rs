use super::Block;

/// Validate the chain against its snapshot: linkage, snapshot equality
/// and the difficulty prefix, walked from position 1 upward.
///
/// Stops at the first violation and reports only a boolean; the genesis
/// block is never re-checked. The snapshot comparison is what catches
/// in-place mutation of an already committed block, since a tampered
/// block keeps a prefix-satisfying hash.
pub fn is_chain_valid(chain: &[Block], snapshot: &[Block], difficulty_prefix: &str) -> bool {
    for i in 1..chain.len() {
        let current = &chain[i];
        let previous = &chain[i - 1];

        if current.previous_hash != previous.hash {
            return false;
        }
        if current.hash != snapshot[i].hash {
            return false;
        }
        if !current.hash.starts_with(difficulty_prefix) {
            return false;
        }
    }
    true
}
