//! Core data model types for merkle_cert

mod address;
mod amount;
mod claim;
mod hash;

pub use address::Address;
pub use amount::Amount;
pub use claim::LeafClaim;
pub use hash::Hash;
