//! Merkle tree reconstruction
//!
//! Proofs each describe a single leaf-to-root path. Folding all of them into
//! a content-keyed registry recovers the shared tree:
//! - Each hash maps to its leaf claim or its two children
//! - Paths passing through the same ancestor land on the same entry
//! - Conflicting content for one hash is an error, never an overwrite

mod node;
mod reconstruct;
mod registry;

pub use node::TreeNode;
pub use reconstruct::Reconstructor;
pub use registry::NodeRegistry;
