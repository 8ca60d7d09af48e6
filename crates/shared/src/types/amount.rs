//! Exact decimal amount with explicit non-finite states.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Finite values wrap `rust_decimal::Decimal`; division by zero and
//! overflow surface as signed infinities or `NaN` instead of panicking.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when text cannot be parsed into an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount: {0}")]
pub struct AmountParseError(pub String);

/// Rounding modes, numbered like the classic big-number rounding modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Towards zero (truncate).
    Down,
    /// Nearest neighbour, ties away from zero.
    #[default]
    HalfUp,
    /// Nearest neighbour, ties to the even neighbour.
    HalfEven,
    /// Away from zero.
    Up,
}

impl From<RoundingMode> for RoundingStrategy {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Down => Self::ToZero,
            RoundingMode::HalfUp => Self::MidpointAwayFromZero,
            RoundingMode::HalfEven => Self::MidpointNearestEven,
            RoundingMode::Up => Self::AwayFromZero,
        }
    }
}

/// An immutable decimal amount.
///
/// Addition, subtraction and multiplication never round: a result whose
/// exact digits do not fit the 96-bit mantissa is [`Amount::NaN`], and one
/// whose magnitude exceeds the range saturates to an infinity. Division keeps
/// 28 significant digits. Call [`Amount::round`] explicitly.
/// Equality and ordering compare mathematical value, so `1.0 == 1`.
#[derive(Debug, Clone, Copy)]
pub enum Amount {
    /// A finite decimal value.
    Finite(Decimal),
    /// Positive infinity, e.g. `1 / 0`.
    PositiveInfinity,
    /// Negative infinity, e.g. `-1 / 0`.
    NegativeInfinity,
    /// Undefined result, e.g. `0 / 0`.
    NaN,
}

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self::Finite(Decimal::ZERO);

    /// Creates an amount from a mantissa and a scale, e.g. `new(12345, 2)` is `123.45`.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self::Finite(Decimal::new(num, scale))
    }

    /// Returns the finite decimal value, if any.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Finite(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true for finite values.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Returns true for either infinity.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::PositiveInfinity | Self::NegativeInfinity)
    }

    /// Returns true for the undefined state.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    /// Returns true if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(value) if value.is_zero())
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Finite(value) => !value.is_zero() && value.is_sign_negative(),
            Self::NegativeInfinity => true,
            Self::PositiveInfinity | Self::NaN => false,
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        match self {
            Self::Finite(value) => Self::Finite(value.abs()),
            Self::PositiveInfinity | Self::NegativeInfinity => Self::PositiveInfinity,
            Self::NaN => Self::NaN,
        }
    }

    /// Three-way comparison on mathematical value. `None` if either side is `NaN`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }

    /// Rounds to at most `places` fraction digits. Non-finite values are returned as-is.
    #[must_use]
    pub fn round(self, places: u32, mode: RoundingMode) -> Self {
        match self {
            Self::Finite(value) => {
                Self::Finite(clean_zero(value.round_dp_with_strategy(places, mode.into())))
            }
            other => other,
        }
    }

    /// Text in normal notation.
    ///
    /// With `places`, the value is rounded half-up and padded with zeros to
    /// exactly that many fraction digits. Without it, the minimum number of
    /// digits needed to represent the value exactly is used.
    #[must_use]
    pub fn to_text(&self, places: Option<u32>) -> String {
        match (self, places) {
            (Self::Finite(value), Some(places)) => {
                let mut fixed = clean_zero(
                    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero),
                );
                fixed.rescale(places);
                // rescale stops short when the digits would not fit the mantissa
                let mut text = fixed.to_string();
                let missing = places.saturating_sub(fixed.scale());
                if missing > 0 {
                    if fixed.scale() == 0 {
                        text.push('.');
                    }
                    text.extend(std::iter::repeat_n('0', missing as usize));
                }
                text
            }
            (Self::Finite(value), None) => clean_zero(value.normalize()).to_string(),
            (Self::PositiveInfinity, _) => "Infinity".to_string(),
            (Self::NegativeInfinity, _) => "-Infinity".to_string(),
            (Self::NaN, _) => "NaN".to_string(),
        }
    }

    /// Nearest binary floating-point number. Lossy; for display and interop only.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Finite(value) => value.to_f64().unwrap_or(f64::NAN),
            Self::PositiveInfinity => f64::INFINITY,
            Self::NegativeInfinity => f64::NEG_INFINITY,
            Self::NaN => f64::NAN,
        }
    }

    const fn infinity(negative: bool) -> Self {
        if negative {
            Self::NegativeInfinity
        } else {
            Self::PositiveInfinity
        }
    }

    /// Sign of a non-NaN value, `true` meaning negative. Zero counts as positive.
    fn sign_negative(&self) -> Option<bool> {
        match self {
            Self::Finite(value) => Some(!value.is_zero() && value.is_sign_negative()),
            Self::PositiveInfinity => Some(false),
            Self::NegativeInfinity => Some(true),
            Self::NaN => None,
        }
    }
}

fn clean_zero(mut value: Decimal) -> Decimal {
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

/// Whether `sum`, as returned by `a.checked_add(b)`, kept every digit.
fn is_exact_sum(a: Decimal, b: Decimal, sum: Decimal) -> bool {
    let scale = sum.scale();
    if scale >= a.scale().max(b.scale()) {
        return true;
    }
    // Digits below `scale` are small enough to add without rounding.
    let tail =
        |value: Decimal| value - value.round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let low = tail(a) + tail(b);
    low.round_dp_with_strategy(scale, RoundingStrategy::ToZero) == low
}

/// Whether `product`, as returned by `a.checked_mul(b)`, kept every digit.
fn is_exact_product(a: Decimal, b: Decimal, product: Decimal) -> bool {
    let (a, b) = (a.normalize(), b.normalize());
    let dropped = (a.scale() + b.scale()).saturating_sub(product.scale());
    if dropped == 0 || a.is_zero() || b.is_zero() {
        return true;
    }
    let (ma, mb) = (a.mantissa().unsigned_abs(), b.mantissa().unsigned_abs());
    let twos = factor_count(ma, 2) + factor_count(mb, 2);
    let fives = factor_count(ma, 5) + factor_count(mb, 5);
    twos.min(fives) >= dropped
}

fn factor_count(mut value: u128, factor: u128) -> u32 {
    let mut count = 0;
    while value != 0 && value % factor == 0 {
        value /= factor;
        count += 1;
    }
    count
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::NaN, _) | (_, Self::NaN) => None,
            (Self::Finite(a), Self::Finite(b)) => Some(a.cmp(b)),
            (Self::PositiveInfinity, Self::PositiveInfinity)
            | (Self::NegativeInfinity, Self::NegativeInfinity) => Some(Ordering::Equal),
            (Self::NegativeInfinity, _) | (_, Self::PositiveInfinity) => Some(Ordering::Less),
            (Self::PositiveInfinity, _) | (_, Self::NegativeInfinity) => Some(Ordering::Greater),
        }
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Finite(value) => Self::Finite(clean_zero(-value)),
            Self::PositiveInfinity => Self::NegativeInfinity,
            Self::NegativeInfinity => Self::PositiveInfinity,
            Self::NaN => Self::NaN,
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (Self::Finite(a), Self::Finite(b)) => match a.checked_add(b) {
                Some(sum) if is_exact_sum(a, b, sum) => Self::Finite(sum),
                Some(_) => Self::NaN,
                // Overflow only happens when both operands share a sign.
                None => Self::infinity(a.is_sign_negative()),
            },
            (Self::PositiveInfinity, Self::NegativeInfinity)
            | (Self::NegativeInfinity, Self::PositiveInfinity) => Self::NaN,
            (infinite, Self::Finite(_)) | (Self::Finite(_), infinite) => infinite,
            (same, _) => same,
        }
    }
}

impl Sub for Amount {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for Amount {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => match a.checked_mul(b) {
                Some(product) if is_exact_product(a, b, product) => {
                    Self::Finite(clean_zero(product))
                }
                Some(_) => Self::NaN,
                None => Self::infinity(a.is_sign_negative() != b.is_sign_negative()),
            },
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (a, b) if a.is_zero() || b.is_zero() => Self::NaN,
            (a, b) => match (a.sign_negative(), b.sign_negative()) {
                (Some(x), Some(y)) => Self::infinity(x != y),
                _ => Self::NaN,
            },
        }
    }
}

impl Div for Amount {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (Self::Finite(a), Self::Finite(b)) => {
                if b.is_zero() {
                    if a.is_zero() {
                        Self::NaN
                    } else {
                        Self::infinity(a.is_sign_negative())
                    }
                } else {
                    a.checked_div(b).map_or_else(
                        || Self::infinity(a.is_sign_negative() != b.is_sign_negative()),
                        |value| Self::Finite(clean_zero(value)),
                    )
                }
            }
            (Self::Finite(_), _) => Self::ZERO,
            (_, Self::Finite(b)) => match self.sign_negative() {
                Some(negative) if b.is_zero() => Self::infinity(negative),
                Some(negative) => Self::infinity(negative != b.is_sign_negative()),
                None => Self::NaN,
            },
            _ => Self::NaN,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::Finite(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::Finite(Decimal::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self::Finite(Decimal::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self::Finite(Decimal::from(value))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::NaN
        } else if value.is_infinite() {
            Self::infinity(value.is_sign_negative())
        } else {
            Decimal::from_f64(value)
                .map_or_else(|| Self::infinity(value.is_sign_negative()), Self::Finite)
        }
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        match text {
            "Infinity" | "+Infinity" => return Ok(Self::PositiveInfinity),
            "-Infinity" => return Ok(Self::NegativeInfinity),
            "NaN" => return Ok(Self::NaN),
            _ => {}
        }
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Decimal::from_str(text)
        };
        parsed
            .map(Self::Finite)
            .map_err(|_| AmountParseError(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(None))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text(None))
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::Finite(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Err(E::custom(format_args!(
            "fractional number {v} would lose digits, write it as a decimal string"
        )))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
#[path = "amount_tests.rs"]
mod tests;
