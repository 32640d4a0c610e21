//! Hash-keyed node registry

use super::TreeNode;
use crate::model::{Hash, LeafClaim};
use crate::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Append-only mapping from a hash to the content that produced it
///
/// Identical sub-structures derived from different proofs collapse onto one
/// entry. An existing entry is never replaced: re-deriving a hash with
/// different content is a [`Error::HashInconsistency`].
#[derive(Debug, Default)]
pub struct NodeRegistry {
    entries: HashMap<Hash, TreeNode>,
    /// Hash → label of the first proof that mentioned it
    sources: HashMap<Hash, String>,
    leaves: usize,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a leaf. Returns `true` if the hash was not yet known.
    pub fn insert_leaf(&mut self, hash: Hash, claim: LeafClaim) -> Result<bool> {
        self.insert(hash, TreeNode::Leaf(claim))
    }

    /// Record an internal node. Returns `true` if the hash was not yet known.
    pub fn insert_node(&mut self, hash: Hash, left: Hash, right: Hash) -> Result<bool> {
        self.insert(hash, TreeNode::internal(left, right))
    }

    /// Record an entry. Returns `true` if the hash was not yet known.
    pub fn insert(&mut self, hash: Hash, node: TreeNode) -> Result<bool> {
        self.check(&hash, &node)?;
        match self.entries.entry(hash) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                if node.is_leaf() {
                    self.leaves += 1;
                }
                slot.insert(node);
                Ok(true)
            }
        }
    }

    /// Fail if `hash` is already registered with different content
    pub fn check(&self, hash: &Hash, node: &TreeNode) -> Result<()> {
        match self.entries.get(hash) {
            Some(existing) if !existing.same_content(node) => Err(Error::HashInconsistency {
                hash: *hash,
                detail: format!(
                    "registered as {}, derived again as {}",
                    existing.describe(),
                    node.describe()
                ),
            }),
            _ => Ok(()),
        }
    }

    /// Remember that the proof for `label` mentions `hash`; the first wins
    pub fn note_source(&mut self, hash: Hash, label: &str) {
        self.sources.entry(hash).or_insert_with(|| label.to_string());
    }

    /// Label of the first proof that mentioned `hash`
    pub fn source_of(&self, hash: &Hash) -> Option<&str> {
        self.sources.get(hash).map(String::as_str)
    }

    pub fn get(&self, hash: &Hash) -> Option<&TreeNode> {
        self.entries.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.entries.contains_key(hash)
    }

    /// Total number of distinct hashes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn internal_count(&self) -> usize {
        self.entries.len() - self.leaves
    }
}
