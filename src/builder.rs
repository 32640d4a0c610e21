//! High-level certificate building
//!
//! This module wires the pipeline together: proof file → registry →
//! certificate, applying the configured consistency checks on the way.

use crate::certificate::{emit_certificate, Certificate};
use crate::input::ProofFile;
use crate::tree::Reconstructor;
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Consistency checks applied while building
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Reject proofs that do not reconstruct the declared root
    pub verify_root: bool,
    /// Reject a declared `total` that differs from the sum of the leaves
    pub verify_total: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            verify_root: true,
            verify_total: true,
        }
    }
}

impl BuildOptions {
    pub fn verify_root(mut self, yes: bool) -> Self {
        self.verify_root = yes;
        self
    }

    pub fn verify_total(mut self, yes: bool) -> Self {
        self.verify_total = yes;
        self
    }
}

/// Builds certificates from proof files
#[derive(Clone, Debug, Default)]
pub struct CertificateBuilder {
    options: BuildOptions,
}

impl CertificateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Load a proof file and build its certificate
    pub fn build_from_path(&self, path: impl AsRef<Path>) -> Result<Certificate> {
        let proofs = ProofFile::load(path)?;
        self.build(&proofs)
    }

    /// Build a certificate from parsed proofs
    pub fn build(&self, file: &ProofFile) -> Result<Certificate> {
        let mut reconstructor = Reconstructor::new(file.root);
        if !self.options.verify_root {
            reconstructor = reconstructor.permissive();
        }

        for proof in &file.proofs {
            reconstructor.add_proof(proof.claim.clone(), &proof.path)?;
        }
        let mismatched = reconstructor.mismatched_count();
        let registry = reconstructor.finish();

        let certificate = emit_certificate(&registry, file.root, file.total)?;

        if let (Some(declared), true) = (file.total, self.options.verify_total) {
            let computed = certificate
                .leaf_sum()
                .map_err(|_| Error::TotalMismatch {
                    declared: declared.to_string(),
                    computed: "more than 2^256 - 1".into(),
                })?;
            if computed != declared {
                return Err(Error::TotalMismatch {
                    declared: declared.to_string(),
                    computed: computed.to_string(),
                });
            }
        }

        info!(
            root = %file.root,
            proofs = file.len(),
            excluded = mismatched,
            leaves = certificate.leaf_length,
            nodes = certificate.node_length,
            "built certificate"
        );
        Ok(certificate)
    }
}
