//! Strongly-typed identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Receipt number assigned by the order store when an order is persisted
///
/// Receipt numbers are positive and unique among stored orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNo(i64);

impl ReceiptNo {
    /// Wraps a raw receipt number
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying number
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the next receipt number in sequence
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ReceiptNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReceiptNo {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for ReceiptNo {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ReceiptNo> for i64 {
    fn from(id: ReceiptNo) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_no_display_and_parse() {
        let receipt = ReceiptNo::new(42);
        assert_eq!(receipt.to_string(), "42");
        assert_eq!("42".parse::<ReceiptNo>().unwrap(), receipt);
        assert_eq!(receipt.next().value(), 43);
    }

    #[test]
    fn test_receipt_no_serializes_as_number() {
        let json = serde_json::to_string(&ReceiptNo::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
