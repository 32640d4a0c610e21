//! Test fixtures: build a sorted-pair Merkle tree and its proofs
#![allow(dead_code)]

use merkle_cert::hasher::{leaf_hash, node_hash};
use merkle_cert::{Address, Amount, Hash};
use serde_json::{json, Map, Value};

pub struct TestTree {
    pub root: Hash,
    /// (address label, amount, sibling path) per leaf, in leaf order
    pub proofs: Vec<(String, Amount, Vec<Hash>)>,
}

/// Deterministic address for the i-th test account
pub fn address(i: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&(i + 1).to_be_bytes());
    bytes[19] = 0xaa;
    Address::from_bytes(bytes)
}

/// Accounts 0..n with amounts (i + 1) * 100
pub fn accounts(n: u32) -> Vec<(String, Amount)> {
    (0..n)
        .map(|i| (address(i).to_hex(), Amount::from(u64::from(i + 1) * 100)))
        .collect()
}

/// Pair leaves level by level; an odd node out is carried up unchanged
pub fn build_tree(accounts: &[(String, Amount)]) -> TestTree {
    let leaves: Vec<Hash> = accounts
        .iter()
        .map(|(label, amount)| leaf_hash(&Address::parse(label).unwrap(), amount))
        .collect();

    let mut levels = vec![leaves];
    while levels.last().unwrap().len() > 1 {
        let next = levels
            .last()
            .unwrap()
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => node_hash(a, b),
                [a] => *a,
                _ => unreachable!(),
            })
            .collect();
        levels.push(next);
    }

    let root = levels.last().unwrap()[0];
    let proofs = accounts
        .iter()
        .enumerate()
        .map(|(i, (label, amount))| {
            let mut idx = i;
            let mut path = Vec::new();
            for level in &levels[..levels.len() - 1] {
                let sibling = idx ^ 1;
                if sibling < level.len() {
                    path.push(level[sibling]);
                }
                idx /= 2;
            }
            (label.clone(), *amount, path)
        })
        .collect();

    TestTree { root, proofs }
}

/// Proof file JSON for a tree
pub fn proof_json(tree: &TestTree, total: Option<Amount>) -> Value {
    let mut proofs = Map::new();
    for (label, amount, path) in &tree.proofs {
        proofs.insert(
            label.clone(),
            json!({
                "amount": amount.to_string(),
                "proof": path.iter().map(|h| h.to_hex()).collect::<Vec<_>>()
            }),
        );
    }
    let mut doc = json!({ "root": tree.root.to_hex(), "proofs": proofs });
    if let Some(total) = total {
        doc["total"] = json!(total.to_string());
    }
    doc
}

pub fn sum(accounts: &[(String, Amount)]) -> Amount {
    accounts
        .iter()
        .fold(Amount::ZERO, |acc, (_, a)| acc.checked_add(*a).unwrap())
}
