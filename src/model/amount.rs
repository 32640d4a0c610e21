//! Non-negative 256-bit token amounts

use crate::{Error, Result};
use primitive_types::U256;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An unsigned 256-bit amount, encoded like a Solidity `uint256`
///
/// Serializes as a bare JSON integer of arbitrary width. Deserializes from
/// either a JSON integer or a decimal string.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256([0; 4]));

    pub fn new(value: U256) -> Self {
        Amount(value)
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    /// Parse a non-negative decimal integer
    pub fn parse_decimal(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed(format!(
                "amount {:?} is not a non-negative integer",
                s
            )));
        }
        U256::from_dec_str(trimmed)
            .map(Amount)
            .map_err(|_| Error::malformed(format!("amount {:?} does not fit in 256 bits", s)))
    }

    /// Interpret a JSON value (integer or decimal string) as an amount
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => Self::parse_decimal(&n.to_string()),
            serde_json::Value::String(s) => Self::parse_decimal(s),
            other => Err(Error::malformed(format!(
                "amount must be an integer or a decimal string, got {}",
                other
            ))),
        }
    }

    /// 32-byte big-endian encoding
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Amount(U256::from(v))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let number = serde_json::Number::from_str(&self.0.to_string()).map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Amount::from_json(&value).map_err(de::Error::custom)
    }
}
