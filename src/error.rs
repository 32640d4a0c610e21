//! Error types for merkle_cert

use crate::model::Hash;
use thiserror::Error;

/// Result type alias for merkle_cert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconstructing or emitting a certificate
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Hash inconsistency at {hash}: {detail}")]
    HashInconsistency { hash: Hash, detail: String },

    #[error("Root mismatch for {address}: proof reconstructs {computed}, expected {expected}")]
    RootMismatch {
        address: String,
        computed: Hash,
        expected: Hash,
    },

    #[error("Unreachable node: {hash} was never registered ({})", referrer(.referenced_by))]
    UnreachableNode {
        hash: Hash,
        /// Label of the first proof whose path names the hash
        referenced_by: Option<String>,
    },

    #[error("Display id collision: {name} names both {first} and {second}")]
    DisplayIdCollision {
        name: String,
        first: Hash,
        second: Hash,
    },

    #[error("Total mismatch: declared {declared}, leaves sum to {computed}")]
    TotalMismatch { declared: String, computed: String },

    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),
}

impl Error {
    /// Shorthand for a `MalformedInput` error
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }
}

fn referrer(label: &Option<String>) -> String {
    match label {
        Some(label) => format!("named in the proof for {}", label),
        None => "no proof names it".to_string(),
    }
}
