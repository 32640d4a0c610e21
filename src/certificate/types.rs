//! Certificate records and JSON layout

use crate::model::{Amount, Hash};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A leaf definition: an account and its amount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub addr: String,
    pub value: Amount,
}

/// An internal node defined by reference to two earlier records
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub addr: String,
    pub left: String,
    pub right: String,
}

/// The flattened, dependency-ordered tree
///
/// A consumer defines every entry of `leaf` first, then every entry of
/// `node` in order; each node only names records defined before it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub root: Hash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Amount>,
    #[serde(rename = "leaf")]
    pub leaves: Vec<LeafRecord>,
    #[serde(rename = "node")]
    pub nodes: Vec<NodeRecord>,
    #[serde(rename = "leafLength")]
    pub leaf_length: usize,
    #[serde(rename = "nodeLength")]
    pub node_length: usize,
}

impl Certificate {
    /// Assemble a certificate, deriving the length fields
    pub fn new(
        root: Hash,
        total: Option<Amount>,
        leaves: Vec<LeafRecord>,
        nodes: Vec<NodeRecord>,
    ) -> Self {
        Certificate {
            root,
            total,
            leaf_length: leaves.len(),
            node_length: nodes.len(),
            leaves,
            nodes,
        }
    }

    /// Sum of all leaf values
    pub fn leaf_sum(&self) -> Result<Amount> {
        self.leaves.iter().try_fold(Amount::ZERO, |acc, leaf| {
            acc.checked_add(leaf.value)
                .ok_or_else(|| Error::InvalidCertificate("leaf values overflow 256 bits".into()))
        })
    }

    /// Serialize, compact or pretty-printed
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
