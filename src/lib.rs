//! # merkle_cert
//!
//! Rebuilds a Merkle tree from per-account membership proofs and flattens it
//! into a certificate a one-node-at-a-time verifier can replay.
//!
//! ## Core Concepts
//!
//! - **Leaves**: `keccak256(address || uint256 amount)` for each account
//! - **Nodes**: `keccak256(min(a, b) || max(a, b))` over two children
//! - **Registry**: every hash any proof passes through, deduplicated
//! - **Certificate**: leaves, then nodes in post-order, each node naming
//!   children defined before it
//!
//! ## Example
//!
//! ```ignore
//! use merkle_cert::CertificateBuilder;
//!
//! let certificate = CertificateBuilder::new().build_from_path("proofs.json")?;
//! std::fs::write("certificate.json", certificate.to_json(false)?)?;
//! ```

pub mod certificate;
pub mod hasher;
pub mod input;
pub mod logging;
pub mod model;
pub mod tree;

mod builder;
mod error;

pub use builder::{BuildOptions, CertificateBuilder};
pub use certificate::{check_certificate, Certificate, CheckReport, LeafRecord, NodeRecord};
pub use error::{Error, Result};
pub use input::{Proof, ProofFile};
pub use model::{Address, Amount, Hash, LeafClaim};
pub use tree::{NodeRegistry, Reconstructor, TreeNode};
