//! 20-byte account addresses

use super::Hash;
use crate::{Error, Result};
use std::fmt;

/// A 20-byte account identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Create an address from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Parse from 40 hex digits, with or without a `0x` prefix
    ///
    /// Casing is not validated against the EIP-55 checksum; see
    /// [`Address::has_valid_checksum`].
    pub fn parse(s: &str) -> Result<Self> {
        let digits = strip_prefix(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| Error::malformed(format!("invalid address {:?}: {}", s, e)))?;
        Ok(Address(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 mixed-case checksum encoding
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Hash::digest(lower.as_bytes());
        let digest = digest.as_bytes();

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = digest[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Whether `s` is consistent with the EIP-55 checksum of its bytes
    ///
    /// All-lowercase and all-uppercase spellings carry no checksum and are
    /// always accepted.
    pub fn has_valid_checksum(s: &str) -> bool {
        let digits = strip_prefix(s);
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if !(has_lower && has_upper) {
            return true;
        }
        match Address::parse(s) {
            Ok(addr) => addr.to_checksum()[2..] == *digits,
            Err(_) => false,
        }
    }
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vectors from EIP-55
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksum_vectors() {
        for s in CHECKSUMMED {
            let addr = Address::parse(s).unwrap();
            assert_eq!(addr.to_checksum(), s);
        }
    }

    #[test]
    fn test_parse_ignores_case_and_prefix() {
        let a = Address::parse(CHECKSUMMED[0]).unwrap();
        let b = Address::parse(&CHECKSUMMED[0].to_lowercase()).unwrap();
        let c = Address::parse(&CHECKSUMMED[0][2..]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("").is_err());
        assert!(Address::parse(&format!("0x{}", "g".repeat(40))).is_err());
        assert!(Address::parse(&format!("0x{}", "a".repeat(42))).is_err());
    }

    #[test]
    fn test_checksum_validation() {
        assert!(Address::has_valid_checksum(CHECKSUMMED[1]));
        assert!(Address::has_valid_checksum(&CHECKSUMMED[1].to_lowercase()));
        assert!(Address::has_valid_checksum(&format!(
            "0x{}",
            CHECKSUMMED[1][2..].to_uppercase()
        )));
        // flip the case of one letter
        let broken = CHECKSUMMED[1].replacen("fB", "FB", 1);
        assert!(!Address::has_valid_checksum(&broken));
    }
}
