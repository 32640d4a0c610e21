//! Independent validation of a finished certificate
//!
//! Replays a certificate the way its consumer would: define leaves, then
//! nodes in order, recomputing every hash from scratch. Nothing from the
//! registry that produced it is trusted.

use super::Certificate;
use crate::hasher::{display_id, leaf_hash, node_hash};
use crate::model::{Address, Hash};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Summary of a certificate that passed [`check_certificate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckReport {
    pub root: Hash,
    pub leaves: usize,
    pub nodes: usize,
}

/// Verify dependency order, naming and hashes of a certificate
///
/// Checks that:
/// - the length fields match the arrays
/// - no name is defined twice (case-insensitively)
/// - every node only refers to records defined before it
/// - every node's `addr` is the display id of the hash of its children
/// - the last record hashes to `root`, and every other record is used
pub fn check_certificate(cert: &Certificate) -> Result<CheckReport> {
    if cert.leaf_length != cert.leaves.len() {
        return Err(invalid(format!(
            "leafLength is {} but there are {} leaves",
            cert.leaf_length,
            cert.leaves.len()
        )));
    }
    if cert.node_length != cert.nodes.len() {
        return Err(invalid(format!(
            "nodeLength is {} but there are {} nodes",
            cert.node_length,
            cert.nodes.len()
        )));
    }

    let mut defined: HashMap<String, Hash> = HashMap::new();
    let mut referenced: HashSet<String> = HashSet::new();
    let mut last = None;

    for leaf in &cert.leaves {
        let address = Address::parse(&leaf.addr)
            .map_err(|_| invalid(format!("leaf addr {:?} is not an address", leaf.addr)))?;
        let h = leaf_hash(&address, &leaf.value);
        define(&mut defined, &leaf.addr, h)?;
        last = Some((leaf.addr.to_ascii_lowercase(), h));
    }

    for (i, node) in cert.nodes.iter().enumerate() {
        let left = lookup(&defined, &node.left, i)?;
        let right = lookup(&defined, &node.right, i)?;
        let h = node_hash(&left, &right);
        let expected = display_id(&h).to_hex();
        if node.addr.to_ascii_lowercase() != expected {
            return Err(invalid(format!(
                "node {} is named {} but its children hash to {}",
                i, node.addr, expected
            )));
        }
        referenced.insert(node.left.to_ascii_lowercase());
        referenced.insert(node.right.to_ascii_lowercase());
        define(&mut defined, &node.addr, h)?;
        last = Some((expected, h));
    }

    let (root_name, computed) = last.ok_or_else(|| invalid("certificate is empty".into()))?;
    if computed != cert.root {
        return Err(invalid(format!(
            "records hash to {}, certificate declares root {}",
            computed, cert.root
        )));
    }

    if let Some(orphan) = defined
        .keys()
        .find(|name| **name != root_name && !referenced.contains(*name))
    {
        return Err(invalid(format!("{} is defined but never used", orphan)));
    }

    Ok(CheckReport {
        root: cert.root,
        leaves: cert.leaves.len(),
        nodes: cert.nodes.len(),
    })
}

fn define(defined: &mut HashMap<String, Hash>, name: &str, h: Hash) -> Result<()> {
    if defined.insert(name.to_ascii_lowercase(), h).is_some() {
        return Err(invalid(format!("{} is defined more than once", name)));
    }
    Ok(())
}

fn lookup(defined: &HashMap<String, Hash>, name: &str, index: usize) -> Result<Hash> {
    defined.get(&name.to_ascii_lowercase()).copied().ok_or_else(|| {
        invalid(format!(
            "node {} refers to {} before it is defined",
            index, name
        ))
    })
}

fn invalid(msg: String) -> Error {
    Error::InvalidCertificate(msg)
}
