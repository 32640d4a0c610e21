//! Certificates: the reconstructed tree flattened for a one-node-at-a-time verifier

mod check;
mod emit;
mod types;

pub use check::{check_certificate, CheckReport};
pub use emit::{emit_certificate, Emitter};
pub use types::{Certificate, LeafRecord, NodeRecord};
