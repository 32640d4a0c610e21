//! Per-account leaf claims

use super::{Address, Amount};

/// One account's entry in the tree: who, how much, and how the input spelled it
#[derive(Clone, Debug)]
pub struct LeafClaim {
    pub address: Address,
    pub amount: Amount,
    /// Address string exactly as it appeared in the proof file
    pub label: String,
}

impl LeafClaim {
    pub fn new(label: impl Into<String>, address: Address, amount: Amount) -> Self {
        LeafClaim {
            address,
            amount,
            label: label.into(),
        }
    }

    /// Whether two claims hash to the same leaf content
    ///
    /// The label is presentation only and is ignored.
    pub fn same_content(&self, other: &LeafClaim) -> bool {
        self.address == other.address && self.amount == other.amount
    }
}
