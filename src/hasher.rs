//! Leaf and node hashing
//!
//! Leaves are `keccak256(address || uint256 amount)`, the packed encoding a
//! Solidity verifier recomputes. Internal nodes hash their two children in
//! canonical (sorted) order, so a prover never needs to know which side a
//! sibling sits on.

use crate::model::{Address, Amount, Hash};

/// Hash one account's claim
pub fn leaf_hash(address: &Address, amount: &Amount) -> Hash {
    Hash::digest_many(&[address.as_bytes(), &amount.to_be_bytes()])
}

/// Order two hashes as `(min, max)` under byte-wise comparison
pub fn canonical_order(a: Hash, b: Hash) -> (Hash, Hash) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Hash two children; commutative in its arguments
pub fn node_hash(a: &Hash, b: &Hash) -> Hash {
    let (left, right) = canonical_order(*a, *b);
    Hash::digest_many(&[left.as_bytes(), right.as_bytes()])
}

/// The 20-byte name an internal node goes by in a certificate
///
/// First 20 bytes of `node_hash(h, h)`. It carries no cryptographic meaning
/// for the verifier; it only gives each node a referenceable handle.
pub fn display_id(h: &Hash) -> Address {
    let digest = node_hash(h, h);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.as_bytes()[..20]);
    Address::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_leaf_hash_known_answer() {
        assert_eq!(
            leaf_hash(&addr(0x11), &Amount::from(100)).to_hex(),
            "0x4f2aefca2998f6aa2ab6799857a78dad717148458baa694d613c74251a29f216"
        );
        assert_eq!(
            leaf_hash(&addr(0x22), &Amount::from(200)).to_hex(),
            "0x7a10cfda5e9b2c0b4e2b98d253b1f1b38d27b63642bc2dfc72471e863437348f"
        );
    }

    #[test]
    fn test_node_hash_known_answer() {
        let a = leaf_hash(&addr(0x11), &Amount::from(100));
        let b = leaf_hash(&addr(0x22), &Amount::from(200));
        let root = node_hash(&a, &b);
        assert_eq!(
            root.to_hex(),
            "0x46451dfcfffe56da3b9019027cda3f4cf0db85034ab47952da3a8db11d19dae3"
        );
        assert_eq!(
            display_id(&root).to_hex(),
            "0x2dc6de10898c44a50265eaa4782031e811d5e1dc"
        );
    }

    #[test]
    fn test_node_hash_commutative() {
        for i in 0..32u8 {
            let a = Hash::digest(&[i]);
            let b = Hash::digest(&[i, i]);
            assert_eq!(node_hash(&a, &b), node_hash(&b, &a));
        }
    }

    #[test]
    fn test_canonical_order() {
        let a = Hash::digest(b"a");
        let b = Hash::digest(b"b");
        let (l, r) = canonical_order(a, b);
        assert!(l <= r);
        assert_eq!(canonical_order(b, a), (l, r));
        assert_eq!(canonical_order(a, a), (a, a));
    }

    #[test]
    fn test_leaf_hash_deterministic_and_distinct() {
        let mut seen = HashSet::new();
        for a in 0..16u8 {
            for amount in 0..16u64 {
                let h = leaf_hash(&addr(a), &Amount::from(amount));
                assert_eq!(h, leaf_hash(&addr(a), &Amount::from(amount)));
                assert!(seen.insert(h), "duplicate leaf hash for ({}, {})", a, amount);
            }
        }
    }

    #[test]
    fn test_display_ids_distinct() {
        let ids: HashSet<_> = (0..256u16)
            .map(|i| display_id(&Hash::digest(&i.to_be_bytes())))
            .collect();
        assert_eq!(ids.len(), 256);
    }
}
