//! Post-order linearization of the registry

use super::{Certificate, LeafRecord, NodeRecord};
use crate::hasher::display_id;
use crate::model::{Amount, Hash};
use crate::tree::{NodeRegistry, TreeNode};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

enum Visit {
    Enter(Hash),
    Exit(Hash),
}

/// Walks the registry from a root, children before parents
///
/// Each distinct hash is emitted once. Leaves are named by their address as
/// given in the input, internal nodes by [`display_id`].
pub struct Emitter<'a> {
    registry: &'a NodeRegistry,
    leaves: Vec<LeafRecord>,
    nodes: Vec<NodeRecord>,
    /// Emitted hash → its name in the certificate
    names: HashMap<Hash, String>,
    /// Lowercased name → the hash that claimed it
    claimed: HashMap<String, Hash>,
}

impl<'a> Emitter<'a> {
    pub fn new(registry: &'a NodeRegistry) -> Self {
        Emitter {
            registry,
            leaves: Vec::new(),
            nodes: Vec::new(),
            names: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    /// Linearize the subtree under `root` into a certificate
    pub fn emit(mut self, root: Hash, total: Option<Amount>) -> Result<Certificate> {
        self.walk(root)?;
        debug!(
            root = %root.short(),
            leaves = self.leaves.len(),
            nodes = self.nodes.len(),
            "emitted certificate"
        );
        Ok(Certificate::new(root, total, self.leaves, self.nodes))
    }

    fn walk(&mut self, root: Hash) -> Result<()> {
        let registry = self.registry;
        let mut stack = vec![Visit::Enter(root)];
        let mut open = HashSet::new();

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(h) => {
                    if self.names.contains_key(&h) {
                        continue;
                    }
                    match registry.get(&h) {
                        None => return Err(unreachable(registry, h)),
                        Some(TreeNode::Leaf(claim)) => {
                            self.define(h, claim.label.clone())?;
                            self.leaves.push(LeafRecord {
                                addr: claim.label.clone(),
                                value: claim.amount,
                            });
                        }
                        Some(TreeNode::Internal { left, right }) => {
                            if !open.insert(h) {
                                return Err(Error::HashInconsistency {
                                    hash: h,
                                    detail: "node is its own descendant".into(),
                                });
                            }
                            stack.push(Visit::Exit(h));
                            stack.push(Visit::Enter(*right));
                            stack.push(Visit::Enter(*left));
                        }
                    }
                }
                Visit::Exit(h) => {
                    open.remove(&h);
                    let (left, right) = match registry.get(&h) {
                        Some(TreeNode::Internal { left, right }) => (*left, *right),
                        _ => return Err(unreachable(registry, h)),
                    };
                    let left = self.name_of(&left)?;
                    let right = self.name_of(&right)?;
                    let addr = display_id(&h).to_hex();
                    self.define(h, addr.clone())?;
                    self.nodes.push(NodeRecord { addr, left, right });
                }
            }
        }
        Ok(())
    }

    fn name_of(&self, h: &Hash) -> Result<String> {
        self.names
            .get(h)
            .cloned()
            .ok_or_else(|| unreachable(self.registry, *h))
    }

    fn define(&mut self, h: Hash, name: String) -> Result<()> {
        let key = name.to_ascii_lowercase();
        if let Some(first) = self.claimed.get(&key) {
            if *first != h {
                return Err(Error::DisplayIdCollision {
                    name,
                    first: *first,
                    second: h,
                });
            }
        }
        self.claimed.insert(key, h);
        self.names.insert(h, name);
        Ok(())
    }
}

fn unreachable(registry: &NodeRegistry, hash: Hash) -> Error {
    Error::UnreachableNode {
        hash,
        referenced_by: registry.source_of(&hash).map(str::to_string),
    }
}

/// Convenience wrapper around [`Emitter`]
pub fn emit_certificate(
    registry: &NodeRegistry,
    root: Hash,
    total: Option<Amount>,
) -> Result<Certificate> {
    Emitter::new(registry).emit(root, total)
}
