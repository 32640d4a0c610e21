//! Rebuilding the shared tree from independent proofs

use super::{NodeRegistry, TreeNode};
use crate::hasher::{canonical_order, leaf_hash, node_hash};
use crate::model::{Hash, LeafClaim};
use crate::{Error, Result};
use tracing::{debug, trace, warn};

/// Folds leaf-to-root proof paths into one [`NodeRegistry`]
///
/// Every proof contributes its leaf and every ancestor it passes through.
/// Ancestors shared between proofs are registered once.
pub struct Reconstructor {
    registry: NodeRegistry,
    root: Hash,
    verify_root: bool,
    proofs: usize,
    mismatched: usize,
}

impl Reconstructor {
    /// Start reconstructing towards `root`, rejecting proofs that end elsewhere
    pub fn new(root: Hash) -> Self {
        Reconstructor {
            registry: NodeRegistry::new(),
            root,
            verify_root: true,
            proofs: 0,
            mismatched: 0,
        }
    }

    /// Accept proofs that end at a different root instead of failing
    ///
    /// Their nodes are still registered but nothing reachable from the
    /// declared root refers to them.
    pub fn permissive(mut self) -> Self {
        self.verify_root = false;
        self
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    /// Register one claim and its sibling path
    ///
    /// Returns the root the path reconstructs to. A rejected proof leaves
    /// the registry as it was: the path is staged, checked against the root
    /// and against existing entries, and only then committed.
    pub fn add_proof(&mut self, claim: LeafClaim, path: &[Hash]) -> Result<Hash> {
        let label = claim.label.clone();
        let leaf = leaf_hash(&claim.address, &claim.amount);
        trace!(address = %label, leaf = %leaf.short(), depth = path.len(), "registering proof");

        let mut staged = Vec::with_capacity(path.len() + 1);
        staged.push((leaf, TreeNode::Leaf(claim)));
        let mut current = leaf;
        for sibling in path {
            let (left, right) = canonical_order(current, *sibling);
            let parent = node_hash(&left, &right);
            staged.push((parent, TreeNode::internal(left, right)));
            current = parent;
        }

        let reaches_root = current == self.root;
        if !reaches_root && self.verify_root {
            return Err(Error::RootMismatch {
                address: label,
                computed: current,
                expected: self.root,
            });
        }

        for (hash, node) in &staged {
            self.registry
                .check(hash, node)
                .map_err(|e| self.in_proof(&label, e))?;
        }
        for (hash, node) in staged {
            self.registry
                .insert(hash, node)
                .map_err(|e| self.in_proof(&label, e))?;
            self.registry.note_source(hash, &label);
        }
        for sibling in path {
            self.registry.note_source(*sibling, &label);
        }

        self.proofs += 1;
        if !reaches_root {
            self.mismatched += 1;
            warn!(
                address = %label,
                computed = %current,
                expected = %self.root,
                "proof does not reach the declared root, leaving it out"
            );
        }
        Ok(current)
    }

    /// Name the proof being added, and the one that got there first
    fn in_proof(&self, label: &str, err: Error) -> Error {
        match err {
            Error::HashInconsistency { hash, detail } => {
                let detail = match self.registry.source_of(&hash) {
                    Some(first) => format!(
                        "{} (proof for {}, first seen in proof for {})",
                        detail, label, first
                    ),
                    None => format!("{} (proof for {})", detail, label),
                };
                Error::HashInconsistency { hash, detail }
            }
            other => other,
        }
    }

    /// Number of proofs registered so far
    pub fn proof_count(&self) -> usize {
        self.proofs
    }

    /// Number of registered proofs that ended somewhere other than the root
    pub fn mismatched_count(&self) -> usize {
        self.mismatched
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn finish(self) -> NodeRegistry {
        debug!(
            proofs = self.proofs,
            leaves = self.registry.leaf_count(),
            internal = self.registry.internal_count(),
            "reconstruction complete"
        );
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Amount};
    use crate::tree::TreeNode;

    fn claim(byte: u8, amount: u64) -> LeafClaim {
        let addr = Address::from_bytes([byte; 20]);
        LeafClaim::new(addr.to_hex(), addr, Amount::from(amount))
    }

    fn leaf_of(byte: u8, amount: u64) -> Hash {
        let c = claim(byte, amount);
        leaf_hash(&c.address, &c.amount)
    }

    #[test]
    fn test_two_leaf_tree() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let root = node_hash(&a, &b);

        let mut rec = Reconstructor::new(root);
        assert_eq!(rec.add_proof(claim(1, 100), &[b]).unwrap(), root);
        assert_eq!(rec.add_proof(claim(2, 200), &[a]).unwrap(), root);

        let reg = rec.finish();
        assert_eq!(reg.leaf_count(), 2);
        assert_eq!(reg.internal_count(), 1);
        match reg.get(&root) {
            Some(TreeNode::Internal { left, right }) => {
                assert_eq!(canonical_order(a, b), (*left, *right));
            }
            other => panic!("root should be internal, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_ancestors_registered_once() {
        // ((a b) (c d))
        let leaves: Vec<Hash> = (1..=4).map(|i| leaf_of(i, i as u64)).collect();
        let ab = node_hash(&leaves[0], &leaves[1]);
        let cd = node_hash(&leaves[2], &leaves[3]);
        let root = node_hash(&ab, &cd);

        let mut rec = Reconstructor::new(root);
        rec.add_proof(claim(1, 1), &[leaves[1], cd]).unwrap();
        rec.add_proof(claim(2, 2), &[leaves[0], cd]).unwrap();
        rec.add_proof(claim(3, 3), &[leaves[3], ab]).unwrap();
        rec.add_proof(claim(4, 4), &[leaves[2], ab]).unwrap();

        assert_eq!(rec.proof_count(), 4);
        let reg = rec.finish();
        assert_eq!(reg.leaf_count(), 4);
        assert_eq!(reg.internal_count(), 3);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let root = leaf_of(9, 9);
        let mut rec = Reconstructor::new(root);
        assert_eq!(rec.add_proof(claim(9, 9), &[]).unwrap(), root);
        assert!(rec.registry().get(&root).unwrap().is_leaf());
    }

    #[test]
    fn test_root_mismatch_rejected() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let root = node_hash(&a, &b);

        let mut rec = Reconstructor::new(root);
        // wrong amount, so the leaf and therefore the root differ
        let err = rec.add_proof(claim(1, 101), &[b]).unwrap_err();
        match err {
            Error::RootMismatch {
                address, expected, ..
            } => {
                assert_eq!(address, Address::from_bytes([1; 20]).to_hex());
                assert_eq!(expected, root);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_permissive_tolerates_mismatch() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let root = node_hash(&a, &b);

        let mut rec = Reconstructor::new(root).permissive();
        let computed = rec.add_proof(claim(1, 101), &[b]).unwrap();
        assert_ne!(computed, root);
        assert_eq!(rec.mismatched_count(), 1);
    }
    #[test]
    fn test_rejected_proof_leaves_registry_untouched() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let root = node_hash(&a, &b);

        let mut rec = Reconstructor::new(root);
        assert!(rec.add_proof(claim(1, 101), &[b]).is_err());
        assert!(rec.registry().is_empty());
        assert_eq!(rec.proof_count(), 0);

        // still usable afterwards
        rec.add_proof(claim(1, 100), &[b]).unwrap();
        rec.add_proof(claim(2, 200), &[a]).unwrap();
        assert_eq!(rec.registry().len(), 3);
    }

    #[test]
    fn test_inconsistency_names_both_proofs() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let c = leaf_of(3, 300);
        let root = node_hash(&a, &b);

        // the root already stands for a different pair of children
        let mut reg = NodeRegistry::new();
        reg.insert_node(root, a, c).unwrap();
        reg.note_source(root, "0xfirst");
        let mut strict = Reconstructor {
            registry: reg,
            root,
            verify_root: true,
            proofs: 0,
            mismatched: 0,
        };
        let claimant = Address::from_bytes([1; 20]).to_hex();
        match strict.add_proof(claim(1, 100), &[b]) {
            Err(Error::HashInconsistency { hash, detail }) => {
                assert_eq!(hash, root);
                assert!(detail.contains(&claimant), "{}", detail);
                assert!(detail.contains("0xfirst"), "{}", detail);
            }
            other => panic!("expected HashInconsistency, got {:?}", other),
        }
        assert!(!strict.registry().contains(&a));
    }

    #[test]
    fn test_siblings_remember_their_proof() {
        let a = leaf_of(1, 100);
        let b = leaf_of(2, 200);
        let root = node_hash(&a, &b);

        let mut rec = Reconstructor::new(root);
        rec.add_proof(claim(1, 100), &[b]).unwrap();
        let label = Address::from_bytes([1; 20]).to_hex();
        assert_eq!(rec.registry().source_of(&b), Some(label.as_str()));
        assert_eq!(rec.registry().source_of(&root), Some(label.as_str()));
    }
}
