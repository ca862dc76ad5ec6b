use serde::Serialize;

/// Serialize `value` to canonical JSON bytes: mapping keys are sorted
/// lexicographically at every nesting level, so structurally identical
/// content always yields identical bytes.
///
/// Routing through `serde_json::Value` does the sorting: without the
/// `preserve_order` feature its `Map` is backed by a `BTreeMap`, so
/// struct fields and map entries alike serialize in key order.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    let value = serde_json::to_value(value).expect("value is JSON-representable");
    serde_json::to_vec(&value).expect("serialize canonical value")
}

#[cfg(test)]
mod tests {
    use super::canonical_bytes;
    use std::collections::BTreeMap;

    #[derive(serde::Serialize)]
    struct Unordered {
        zulu: u32,
        alpha: &'static str,
        mike: BTreeMap<String, f64>,
    }

    #[test]
    fn keys_are_sorted_at_every_level() {
        let mut mike = BTreeMap::new();
        mike.insert("b".to_string(), 2.0);
        mike.insert("a".to_string(), 1.5);
        let v = Unordered {
            zulu: 7,
            alpha: "x",
            mike,
        };
        let bytes = canonical_bytes(&v);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"alpha":"x","mike":{"a":1.5,"b":2.0},"zulu":7}"#
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut first = BTreeMap::new();
        first.insert("alice", 100.0);
        first.insert("bob", 30.0);
        let mut second = BTreeMap::new();
        second.insert("bob", 30.0);
        second.insert("alice", 100.0);
        assert_eq!(canonical_bytes(&first), canonical_bytes(&second));
    }
}
