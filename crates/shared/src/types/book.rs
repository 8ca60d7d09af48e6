//! Book-level formatting primitives.

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Decimal separator used when rendering amounts as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecimalSeparator {
    /// `1234.56`
    #[default]
    Dot,
    /// `1234,56`
    Comma,
}

impl DecimalSeparator {
    /// The separator character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }

    /// Formats an amount with exactly `fraction_digits` digits after this separator.
    ///
    /// Infinities render as `∞` / `-∞`; `NaN` renders as an empty string.
    #[must_use]
    pub fn format(self, value: Amount, fraction_digits: u32) -> String {
        match value {
            Amount::Finite(_) => {
                let text = value.to_text(Some(fraction_digits));
                match self {
                    Self::Dot => text,
                    Self::Comma => text.replace('.', ","),
                }
            }
            Amount::PositiveInfinity => "∞".to_string(),
            Amount::NegativeInfinity => "-∞".to_string(),
            Amount::NaN => String::new(),
        }
    }
}

impl std::fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dot => write!(f, "DOT"),
            Self::Comma => write!(f, "COMMA"),
        }
    }
}

impl std::str::FromStr for DecimalSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DOT" => Ok(Self::Dot),
            "COMMA" => Ok(Self::Comma),
            _ => Err(format!("Unknown decimal separator: {s}")),
        }
    }
}

/// Time bucketing used to split period and cumulative balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Periodicity {
    /// One bucket per day.
    Daily,
    /// One bucket per month.
    #[default]
    Monthly,
    /// One bucket per year.
    Yearly,
}

impl Periodicity {
    /// Date pattern used for period labels when a book date pattern is too precise.
    #[must_use]
    pub const fn label_pattern(self) -> Option<&'static str> {
        match self {
            Self::Daily => None,
            Self::Monthly => Some("%m/%Y"),
            Self::Yearly => Some("%Y"),
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "DAILY"),
            Self::Monthly => write!(f, "MONTHLY"),
            Self::Yearly => write!(f, "YEARLY"),
        }
    }
}

impl std::str::FromStr for Periodicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(format!("Unknown periodicity: {s}")),
        }
    }
}
