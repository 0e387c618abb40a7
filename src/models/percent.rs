//! Percentage type for module allocations
//!
//! A `Percent` is an exact decimal constrained to the range [0, 100]. The
//! range is enforced at construction and at deserialization, so a stored
//! document with an out-of-range percentage fails to load instead of leaking
//! into arithmetic.

use crate::models::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A percentage in the inclusive range [0, 100]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    /// Create a percent, rejecting values outside [0, 100]
    pub fn new(value: Decimal) -> Result<Self, PercentError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(PercentError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Parse a percent from a string such as "60" or "12.5"
    pub fn parse(s: &str) -> Result<Self, PercentError> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s);
        let value =
            Decimal::from_str(s).map_err(|_| PercentError::InvalidFormat(s.to_string()))?;
        Self::new(value)
    }

    /// Compute this percentage's share of a total amount
    ///
    /// `share_of(1000) for 60% = 600`, computed in exact decimal.
    pub fn share_of(&self, total: Money) -> Money {
        Money::new(total.amount() * self.0 / Decimal::ONE_HUNDRED)
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = PercentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for Decimal {
    fn from(p: Percent) -> Decimal {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// Error type for percent construction and parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    OutOfRange(Decimal),
    InvalidFormat(String),
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentError::OutOfRange(v) => {
                write!(f, "Percentage must be between 0 and 100, got {}", v)
            }
            PercentError::InvalidFormat(s) => write!(f, "Invalid percentage: {}", s),
        }
    }
}

impl std::error::Error for PercentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_range() {
        assert!(Percent::new(Decimal::ZERO).is_ok());
        assert!(Percent::new(Decimal::from(60)).is_ok());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(Percent::new(Decimal::from(-1)).is_err());
        assert!(Percent::new(Decimal::from(101)).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Percent::parse("60").unwrap().value(), Decimal::from(60));
        assert_eq!(Percent::parse("60%").unwrap().value(), Decimal::from(60));
        assert_eq!(
            Percent::parse("12.5").unwrap().value(),
            Decimal::from_str("12.5").unwrap()
        );
        assert!(Percent::parse("101").is_err());
        assert!(Percent::parse("-5").is_err());
        assert!(Percent::parse("abc").is_err());
    }

    #[test]
    fn test_share_of_exact() {
        let sixty = Percent::parse("60").unwrap();
        let forty = Percent::parse("40").unwrap();
        let total = Money::from_major(1000);

        assert_eq!(sixty.share_of(total), Money::from_major(600));
        assert_eq!(forty.share_of(total), Money::from_major(400));
        assert_eq!(
            sixty.share_of(total) + forty.share_of(total),
            total
        );
    }

    #[test]
    fn test_share_of_fractional() {
        let pct = Percent::parse("12.5").unwrap();
        assert_eq!(
            pct.share_of(Money::from_major(200)),
            Money::from_major(25)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Percent::parse("60").unwrap().to_string(), "60%");
        assert_eq!(Percent::parse("12.50").unwrap().to_string(), "12.5%");
    }

    #[test]
    fn test_deserialization_rejects_out_of_range() {
        let ok: Result<Percent, _> = serde_json::from_str("\"60\"");
        assert!(ok.is_ok());

        let too_big: Result<Percent, _> = serde_json::from_str("\"150\"");
        assert!(too_big.is_err());

        let negative: Result<Percent, _> = serde_json::from_str("\"-10\"");
        assert!(negative.is_err());
    }
}
