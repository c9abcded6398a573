//! Numeric backends for measures
//!
//! Everything above this module is generic over [`Numeric`], so a measure can
//! carry `f64` for speed or `rust_decimal::Decimal` for exact arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt::Debug;

/// The arithmetic a numeric type must supply to back a measure
pub trait Numeric: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Additive identity
    fn zero() -> Self;
    /// Multiplicative identity
    fn one() -> Self;
    fn neg(&self) -> Self;
    fn abs(&self) -> Self;
    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self;
    fn mult(&self, other: &Self) -> Self;
    fn div(&self, other: &Self) -> Self;
    /// Raise to an integer power
    fn pow(&self, power: i32) -> Self;
    fn reciprocal(&self) -> Self;
    /// `None` when the product is not representable
    fn checked_mult(&self, other: &Self) -> Option<Self>;
    /// `None` when the quotient is not representable, including division by
    /// zero
    fn checked_div(&self, other: &Self) -> Option<Self>;
    fn checked_pow(&self, power: i32) -> Option<Self>;
    /// Round to the nearest integer
    fn round(&self) -> Self;
    fn floor(&self) -> Self;
    fn compare(&self, other: &Self) -> Ordering;
    /// Full precision display
    fn format(&self) -> String;
    /// Fixed-point notation with `fraction_digits` after the point
    fn to_fixed(&self, fraction_digits: usize) -> String;
    /// Fixed or exponential notation with `precision` significant digits
    fn to_precision(&self, precision: usize) -> String;
    /// Exponential notation with `fraction_digits` after the point
    fn to_exponential(&self, fraction_digits: usize) -> String;

    fn is_zero(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Equal
    }
}

/// Floats overflow to infinity instead of failing, so the checked forms
/// reject any non-finite result. Rendering follows ECMAScript `Number`
/// formatting: exponent notation below `1e-6` and from `1e21`, and exact
/// ties rounded up in magnitude.
impl Numeric for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn neg(&self) -> Self {
        -*self
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mult(&self, other: &Self) -> Self {
        self * other
    }

    fn div(&self, other: &Self) -> Self {
        self / other
    }

    fn pow(&self, power: i32) -> Self {
        self.powi(power)
    }

    fn reciprocal(&self) -> Self {
        1.0 / self
    }

    fn checked_mult(&self, other: &Self) -> Option<Self> {
        finite(self * other)
    }

    fn checked_div(&self, other: &Self) -> Option<Self> {
        finite(self / other)
    }

    fn checked_pow(&self, power: i32) -> Option<Self> {
        finite(self.powi(power))
    }

    /// Ties go toward positive infinity, so `-2.5` rounds to `-2`
    fn round(&self) -> Self {
        let floor = f64::floor(*self);
        if self - floor >= 0.5 {
            floor + 1.0
        } else {
            floor
        }
    }

    fn floor(&self) -> Self {
        f64::floor(*self)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }

    fn format(&self) -> String {
        if let Some(special) = non_finite(*self) {
            return special;
        }
        // -0 renders as 0
        if *self == 0.0 {
            return "0".to_string();
        }

        let (digits, exponent) = shortest_digits(f64::abs(*self));
        let sign = if *self < 0.0 { "-" } else { "" };
        let k = digits.len() as i32;
        let n = exponent + 1;

        let body = if k <= n && n <= 21 {
            format!("{digits}{}", "0".repeat((n - k) as usize))
        } else if 0 < n && n <= 21 {
            let (int, frac) = digits.split_at(n as usize);
            format!("{int}.{frac}")
        } else if -6 < n && n <= 0 {
            format!("0.{}{digits}", "0".repeat(-n as usize))
        } else {
            let (lead, rest) = digits.split_at(1);
            let point = if rest.is_empty() { "" } else { "." };
            format!("{lead}{point}{rest}{}", exponent_suffix(exponent))
        };
        format!("{sign}{body}")
    }

    fn to_fixed(&self, fraction_digits: usize) -> String {
        if !self.is_finite() || f64::abs(*self) >= 1e21 {
            return Numeric::format(self);
        }

        let (mut digits, mut int_len) = exact_digits(*self);
        if round_half_up(&mut digits, int_len + fraction_digits) {
            int_len += 1;
        }

        let sign = if *self < 0.0 { "-" } else { "" };
        let (int, frac) = digits.split_at(int_len);
        if frac.is_empty() {
            format!("{sign}{}", render(int))
        } else {
            format!("{sign}{}.{}", render(int), render(frac))
        }
    }

    fn to_precision(&self, precision: usize) -> String {
        if !self.is_finite() {
            return Numeric::format(self);
        }
        let precision = precision.max(1);
        let (digits, exponent) = significant_digits(*self, precision);
        let sign = if *self < 0.0 { "-" } else { "" };

        if exponent < -6 || exponent >= precision as i32 {
            return format!("{sign}{}", exponential(&digits, exponent));
        }

        let body = if exponent >= 0 {
            let (int, frac) = digits.split_at(exponent as usize + 1);
            if frac.is_empty() {
                render(int)
            } else {
                format!("{}.{}", render(int), render(frac))
            }
        } else {
            format!("0.{}{}", "0".repeat((-exponent - 1) as usize), render(&digits))
        };
        format!("{sign}{body}")
    }

    fn to_exponential(&self, fraction_digits: usize) -> String {
        if !self.is_finite() {
            return Numeric::format(self);
        }
        let (digits, exponent) = significant_digits(*self, fraction_digits + 1);
        let sign = if *self < 0.0 { "-" } else { "" };
        format!("{sign}{}", exponential(&digits, exponent))
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

/// Shortest round-trip digits of a positive float and its decimal exponent
fn shortest_digits(value: f64) -> (String, i32) {
    let rendered = format!("{value:e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    (mantissa.replace('.', ""), exponent.parse().unwrap_or(0))
}

/// Every decimal digit of `|value|`, integer part first, and the number of
/// integer digits. The expansion is exact, so no rounding has happened yet.
fn exact_digits(value: f64) -> (Vec<u8>, usize) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    let lowest_bit = if mantissa == 0 {
        0
    } else {
        exponent + mantissa.trailing_zeros() as i32
    };
    let places = (-lowest_bit).max(0) as usize;

    let rendered = format!("{:.*}", places, f64::abs(value));
    let (int, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let digits = int.bytes().chain(frac.bytes()).map(|b| b - b'0').collect();
    (digits, int.len())
}

/// The first `count` significant digits of `|value|`, rounded half up, and
/// the decimal exponent of the first one
fn significant_digits(value: f64, count: usize) -> (Vec<u8>, i32) {
    if value == 0.0 {
        return (vec![0; count], 0);
    }

    let (digits, int_len) = exact_digits(value);
    let lead = digits.iter().position(|d| *d != 0).unwrap_or(0);
    let mut exponent = int_len as i32 - lead as i32 - 1;

    let mut significant = digits[lead..].to_vec();
    if round_half_up(&mut significant, count) {
        exponent += 1;
        significant.truncate(count);
    }
    (significant, exponent)
}

/// Keep the first `keep` digits, padding with zeros, and round up when the
/// first dropped digit is 5 or more. Returns true when the carry added a
/// leading digit.
fn round_half_up(digits: &mut Vec<u8>, keep: usize) -> bool {
    let round_up = digits.get(keep).is_some_and(|d| *d >= 5);
    digits.resize(keep, 0);
    if !round_up {
        return false;
    }

    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    digits.insert(0, 1);
    true
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn exponential(digits: &[u8], exponent: i32) -> String {
    let (lead, rest) = digits.split_at(1.min(digits.len()));
    if rest.is_empty() {
        format!("{}{}", render(lead), exponent_suffix(exponent))
    } else {
        format!("{}.{}{}", render(lead), render(rest), exponent_suffix(exponent))
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{}", exponent.abs())
}

/// Past the representable range a result pins to the bound with its sign
fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Overflow saturates instead of panicking. Division by zero saturates
/// toward the sign of the dividend.
impl Numeric for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn one() -> Self {
        Decimal::ONE
    }

    fn neg(&self) -> Self {
        -*self
    }

    fn abs(&self) -> Self {
        Decimal::abs(self)
    }

    fn add(&self, other: &Self) -> Self {
        self.saturating_add(*other)
    }

    fn sub(&self, other: &Self) -> Self {
        self.saturating_sub(*other)
    }

    fn mult(&self, other: &Self) -> Self {
        self.saturating_mul(*other)
    }

    fn div(&self, other: &Self) -> Self {
        Numeric::checked_div(self, other)
            .unwrap_or_else(|| saturated(self.is_sign_negative() != other.is_sign_negative()))
    }

    fn pow(&self, power: i32) -> Self {
        Numeric::checked_pow(self, power)
            .unwrap_or_else(|| saturated(self.is_sign_negative() && power % 2 != 0))
    }

    fn reciprocal(&self) -> Self {
        Numeric::div(&Decimal::ONE, self)
    }

    fn checked_mult(&self, other: &Self) -> Option<Self> {
        Decimal::checked_mul(*self, *other)
    }

    fn checked_div(&self, other: &Self) -> Option<Self> {
        Decimal::checked_div(*self, *other)
    }

    fn checked_pow(&self, power: i32) -> Option<Self> {
        MathematicalOps::checked_powi(self, i64::from(power))
    }

    /// Ties go away from zero
    fn round(&self) -> Self {
        self.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    fn floor(&self) -> Self {
        Decimal::floor(self)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn format(&self) -> String {
        self.normalize().to_string()
    }

    fn to_fixed(&self, fraction_digits: usize) -> String {
        let dp = u32::try_from(fraction_digits).unwrap_or(u32::MAX);
        let rounded = self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.*}", fraction_digits, rounded)
    }

    fn to_precision(&self, precision: usize) -> String {
        match self.to_f64() {
            Some(value) => value.to_precision(precision),
            None => self.format(),
        }
    }

    fn to_exponential(&self, fraction_digits: usize) -> String {
        match self.to_f64() {
            Some(value) => value.to_exponential(fraction_digits),
            None => self.format(),
        }
    }
}
