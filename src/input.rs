//! Proof file parsing
//!
//! The input is a JSON object:
//!
//! ```json
//! {
//!   "root": "0x…",
//!   "total": "300",
//!   "proofs": {
//!     "0x1111…": { "amount": 100, "proof": ["0x…"] }
//!   }
//! }
//! ```
//!
//! Amounts may be JSON integers or decimal strings. Every problem is reported
//! as [`Error::MalformedInput`] naming the offending address.

use crate::model::{Address, Amount, Hash, LeafClaim};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::warn;

#[derive(Deserialize)]
struct RawProofFile {
    root: String,
    #[serde(default)]
    total: Option<serde_json::Value>,
    proofs: BTreeMap<String, RawProof>,
}

#[derive(Deserialize)]
struct RawProof {
    amount: serde_json::Value,
    proof: Vec<String>,
}

/// One account's claim with the sibling path from its leaf to the root
#[derive(Clone, Debug)]
pub struct Proof {
    pub claim: LeafClaim,
    pub path: Vec<Hash>,
}

/// A validated proof file
#[derive(Clone, Debug)]
pub struct ProofFile {
    pub root: Hash,
    pub total: Option<Amount>,
    /// Ordered by address string
    pub proofs: Vec<Proof>,
}

impl ProofFile {
    /// Read and validate a proof file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate proof file JSON
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawProofFile = serde_json::from_str(json)
            .map_err(|e| Error::malformed(format!("proof file: {}", e)))?;

        let root = Hash::from_hex(&raw.root)
            .map_err(|e| Error::malformed(format!("root {:?}: {}", raw.root, e)))?;

        let total = raw
            .total
            .as_ref()
            .map(|v| Amount::from_json(v).map_err(|e| within("total", e)))
            .transpose()?;

        let mut seen: HashMap<Address, String> = HashMap::new();
        let mut proofs = Vec::with_capacity(raw.proofs.len());

        for (label, entry) in raw.proofs {
            let address = Address::parse(&label)?;
            if let Some(previous) = seen.insert(address, label.clone()) {
                return Err(Error::malformed(format!(
                    "{} and {} are the same address",
                    previous, label
                )));
            }
            if !Address::has_valid_checksum(&label) {
                warn!(address = %label, expected = %address.to_checksum(), "address checksum mismatch");
            }

            let amount = Amount::from_json(&entry.amount).map_err(|e| within(&label, e))?;

            let path = entry
                .proof
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    Hash::from_hex(h).map_err(|e| {
                        Error::malformed(format!("{}: proof[{}] {:?}: {}", label, i, h, e))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            proofs.push(Proof {
                claim: LeafClaim::new(label, address, amount),
                path,
            });
        }

        Ok(ProofFile {
            root,
            total,
            proofs,
        })
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }
}

/// Prefix a malformed-input message with where it happened
fn within(location: &str, err: Error) -> Error {
    match err {
        Error::MalformedInput(msg) => Error::malformed(format!("{}: {}", location, msg)),
        other => other,
    }
}
