use sha2::{Digest, Sha256};

/// Find the smallest nonce whose digest satisfies the difficulty prefix.
///
/// Starting at 0, computes `SHA-256(content || decimal(nonce))` and
/// increments until the hex digest starts with `difficulty_prefix`.
/// Blocking and CPU-bound; there is no iteration bound or cancellation.
/// Pure over its inputs, so tests can pass a short prefix.
pub fn mine(content: &[u8], difficulty_prefix: &str) -> (u64, String) {
    let mut nonce: u64 = 0;
    loop {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hasher.update(nonce.to_string().as_bytes());
        let digest = hex::encode(hasher.finalize());
        if digest.starts_with(difficulty_prefix) {
            return (nonce, digest);
        }
        nonce += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::mine;
    use sha2::{Digest, Sha256};

    #[test]
    fn digest_satisfies_prefix() {
        let (_, hash) = mine(b"some block content", "00");
        assert!(hash.starts_with("00"));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn search_is_deterministic() {
        let a = mine(b"payload", "0");
        let b = mine(b"payload", "0");
        assert_eq!(a, b);
    }

    #[test]
    fn returns_smallest_nonce() {
        let (nonce, _) = mine(b"payload", "00");
        for earlier in 0..nonce {
            let mut hasher = Sha256::new();
            hasher.update(b"payload");
            hasher.update(earlier.to_string().as_bytes());
            let digest = hex::encode(hasher.finalize());
            assert!(!digest.starts_with("00"));
        }
    }

    #[test]
    fn nonce_enters_as_decimal_ascii() {
        let (nonce, hash) = mine(b"payload", "0");
        let mut hasher = Sha256::new();
        hasher.update(b"payload");
        hasher.update(nonce.to_string().as_bytes());
        assert_eq!(hash, hex::encode(hasher.finalize()));
    }
}
