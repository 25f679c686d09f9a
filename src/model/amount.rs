//! Monetary values read from prompts and CSV files.
//!
//! `Amount` wraps `Decimal` so that sums are exact no matter what order records are added in. It
//! accepts values typed with or without a dollar sign and thousands separators, e.g. `1200`,
//! `$1,200.50`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Controls how an `Amount` is written back out as text.
///
/// # Examples
///  - `AmountFormat::MONEY` -> `$60,000.00`
///  - `AmountFormat::PLAIN` -> `60000.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    dollar: bool,
    commas: bool,
}

impl AmountFormat {
    /// Used for reports: a dollar sign, thousands separators and two decimals. The digits are
    /// produced from an `f64`, so magnitudes above 2^53 print rounded.
    pub const MONEY: AmountFormat = AmountFormat {
        dollar: true,
        commas: true,
    };

    /// Used for the flat files: a bare decimal number.
    pub const PLAIN: AmountFormat = AmountFormat {
        dollar: false,
        commas: false,
    };
}

impl Default for AmountFormat {
    fn default() -> Self {
        AmountFormat::PLAIN
    }
}

/// A dollar amount.
///
/// Unlike the formatting, which only matters for display, equality and ordering consider the
/// numeric value alone, so `$1,000` and `1000.00` are equal.
///
/// ```
/// # use pennywise::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("$1,000").unwrap();
/// let b = Amount::from_str("1000.00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.money().to_string(), "$1,000.00");
/// assert_eq!(b.to_string(), "1000.00");
/// ```
#[derive(Clone, Copy, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates an `Amount` that displays as a plain decimal.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: AmountFormat::PLAIN,
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns a copy of this amount that displays with `format`.
    pub fn with_format(self, format: AmountFormat) -> Self {
        Self { format, ..self }
    }

    /// Shorthand for `with_format(AmountFormat::MONEY)`.
    pub fn money(self) -> Self {
        self.with_format(AmountFormat::MONEY)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }

    /// Lossy conversion used for chart geometry.
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.value)
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug)]
pub struct AmountError(rust_decimal::Error);

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (dollar, digits) = match unsigned.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, unsigned),
        };

        // Thousands separators
        let without_commas = digits.replace(',', "");
        let commas = without_commas.len() < digits.len();

        let mut value = Decimal::from_str(&without_commas)
            .or_else(|_| Decimal::from_scientific(&without_commas))
            .map_err(AmountError)?;
        if negative {
            value.set_sign_negative(true);
        }
        Ok(Amount {
            value,
            format: AmountFormat { dollar, commas },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let dol = if self.format.dollar { "$" } else { "" };
        let num = self
            .value
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if self.format.commas {
            write!(
                f,
                "{sign}{dol}{}",
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            write!(f, "{sign}{dol}{:.2}", num)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Two decimals unless more were entered; the file keeps the exact value
        if self.value.scale() > 2 {
            serializer.serialize_str(&self.value.normalize().to_string())
        } else {
            serializer.serialize_str(&self.with_format(AmountFormat::PLAIN).to_string())
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount {
            value: self.value + rhs.value,
            format: self.format,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
