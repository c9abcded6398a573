//! Rendering measures and values
//!
//! [`MeasureFormatter`] is the visitor that [`Measure::format`] drives over an
//! operation tree. [`StringFormatter`] is the standard string backend,
//! configured from [`FormatOptions`].
//!
//! [`Measure::format`]: crate::Measure::format

mod multi;
mod value;

pub use multi::{DynamicFormatter, FormattedValue, MultiUnitFormatter};
pub use value::{ValueDisplay, ValueFormatOptions, ValueFormatter};

use serde::{Deserialize, Serialize};

use crate::measure::Identifiers;

/// One callback per operation node kind.
///
/// `Output` may be a string or any structured representation.
pub trait MeasureFormatter {
    type Output;

    fn leaf(&self, plural: bool, identifiers: &Identifiers) -> Self::Output;
    fn prefix(&self, inner: Self::Output, name: &str, symbol: &str) -> Self::Output;
    fn times(&self, left: Self::Output, right: Self::Output) -> Self::Output;
    fn over(&self, numerator: Self::Output, denominator: Self::Output) -> Self::Output;
    fn pow(&self, inner: Self::Output, power: i32) -> Self::Output;
    fn reciprocal(&self, inner: Self::Output) -> Self::Output;
    fn parentheses(&self, inner: Self::Output) -> Self::Output;
}

/// Whether units are written as symbols or names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitText {
    #[default]
    Symbol,
    Name,
}

/// Whether powers are written as superscripts or words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerStyle {
    #[default]
    Symbol,
    Name,
}

/// Declarative configuration for a [`StringFormatter`].
///
/// Missing fields take the symbol-style defaults:
///
/// ```
/// use metron_core::format::{FormatOptions, UnitText};
///
/// let options: FormatOptions = serde_json::from_str(r#"{"unitText": "name", "per": " per "}"#).unwrap();
/// assert_eq!(options.unit_text, UnitText::Name);
/// assert_eq!(options.times, "·");
/// assert!(options.parentheses);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub unit_text: UnitText,
    /// Multiplication separator
    pub times: String,
    /// Division separator
    pub per: String,
    pub pow: PowerStyle,
    pub parentheses: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            unit_text: UnitText::Symbol,
            times: "·".to_string(),
            per: "/".to_string(),
            pow: PowerStyle::Symbol,
            parentheses: true,
        }
    }
}

/// Renders a measure tree to a `String`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFormatter {
    options: FormatOptions,
}

impl StringFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// `km/h`, `m²/(g·s)`
    pub fn symbols() -> Self {
        Self::default()
    }

    /// `kilometers per hour`, `meters squared per gram second`
    pub fn names() -> Self {
        Self::new(FormatOptions {
            unit_text: UnitText::Name,
            times: " ".to_string(),
            per: " per ".to_string(),
            pow: PowerStyle::Name,
            parentheses: false,
        })
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl From<FormatOptions> for StringFormatter {
    fn from(options: FormatOptions) -> Self {
        Self::new(options)
    }
}

impl MeasureFormatter for StringFormatter {
    type Output = String;

    fn leaf(&self, plural: bool, identifiers: &Identifiers) -> String {
        match self.options.unit_text {
            UnitText::Symbol => identifiers.symbol.clone(),
            UnitText::Name if plural => identifiers.name_plural.clone(),
            UnitText::Name => identifiers.name_singular.clone(),
        }
    }

    fn prefix(&self, inner: String, name: &str, symbol: &str) -> String {
        match self.options.unit_text {
            UnitText::Symbol => format!("{symbol}{inner}"),
            UnitText::Name => format!("{name}{inner}"),
        }
    }

    fn times(&self, left: String, right: String) -> String {
        format!("{left}{}{right}", self.options.times)
    }

    fn over(&self, numerator: String, denominator: String) -> String {
        format!("{numerator}{}{denominator}", self.options.per)
    }

    fn pow(&self, inner: String, power: i32) -> String {
        match self.options.pow {
            PowerStyle::Symbol => format!("{inner}{}", superscript(power)),
            PowerStyle::Name => format!("{inner}{}", power_name(power)),
        }
    }

    fn reciprocal(&self, inner: String) -> String {
        format!("1{}{inner}", self.options.per)
    }

    fn parentheses(&self, inner: String) -> String {
        if self.options.parentheses {
            format!("({inner})")
        } else {
            inner
        }
    }
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Unicode superscript for an exponent; a power of one renders as nothing
pub fn superscript(power: i32) -> String {
    if power == 1 {
        return String::new();
    }

    let digits: String = power
        .unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| SUPERSCRIPT_DIGITS[d as usize])
        .collect();

    if power < 0 {
        format!("⁻{digits}")
    } else {
        digits
    }
}

/// Inverse of [`superscript`] for a run of superscript characters
pub(crate) fn parse_superscript(text: &str) -> Option<i32> {
    let (negative, digits) = match text.strip_prefix('⁻') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: i32 = 0;
    for c in digits.chars() {
        let digit = SUPERSCRIPT_DIGITS.iter().position(|d| *d == c)?;
        value = value.checked_mul(10)?.checked_add(digit as i32)?;
    }
    Some(if negative { -value } else { value })
}

/// Spoken suffix for an exponent, e.g. ` squared`
pub fn power_name(power: i32) -> String {
    match power {
        1 => String::new(),
        2 => " squared".to_string(),
        3 => " cubed".to_string(),
        4 => " to the fourth".to_string(),
        5 => " to the fifth".to_string(),
        6 => " to the sixth".to_string(),
        7 => " to the seventh".to_string(),
        8 => " to the eighth".to_string(),
        9 => " to the ninth".to_string(),
        n => format!(" to the {n}"),
    }
}
