//! Registry entry types

use crate::model::{Hash, LeafClaim};

/// What a hash stands for in the reconstructed tree
///
/// Leaves and internal nodes share one keyspace; the variant is the only
/// thing telling them apart.
#[derive(Clone, Debug)]
pub enum TreeNode {
    /// An account claim
    Leaf(LeafClaim),
    /// An internal node; `left <= right` byte-wise
    Internal { left: Hash, right: Hash },
}

impl TreeNode {
    /// Create an internal node, putting the children in canonical order
    pub fn internal(a: Hash, b: Hash) -> Self {
        let (left, right) = crate::hasher::canonical_order(a, b);
        TreeNode::Internal { left, right }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Whether two entries describe the same content
    pub fn same_content(&self, other: &TreeNode) -> bool {
        match (self, other) {
            (TreeNode::Leaf(a), TreeNode::Leaf(b)) => a.same_content(b),
            (
                TreeNode::Internal { left, right },
                TreeNode::Internal {
                    left: other_left,
                    right: other_right,
                },
            ) => left == other_left && right == other_right,
            _ => false,
        }
    }

    /// Human-readable summary for diagnostics
    pub fn describe(&self) -> String {
        match self {
            TreeNode::Leaf(claim) => format!("leaf({}, {})", claim.label, claim.amount),
            TreeNode::Internal { left, right } => {
                format!("node({}, {})", left.short(), right.short())
            }
        }
    }
}
