//! Currency codes supported at sign-up
//!
//! A closed set: unknown codes are rejected when parsing CLI input or
//! deserializing stored documents. The symbol is stamped onto transactions
//! at record time so history keeps its original symbol even if the account
//! currency ever changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported account currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    /// ISO 4217 code
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// Display symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// All supported currencies, for help text
    pub const fn all() -> [Currency; 5] {
        [
            Currency::Usd,
            Currency::Inr,
            Currency::Eur,
            Currency::Gbp,
            Currency::Jpy,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            other => {
                let supported: Vec<&str> = Currency::all().iter().map(|c| c.code()).collect();
                Err(format!(
                    "Unknown currency code '{}' (supported: {})",
                    other,
                    supported.join(", ")
                ))
            }
        }
    }
}
