//! Numeric value display

use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::numeric::Numeric;

/// How a converted value is written out
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDisplay<N: Numeric = f64> {
    FullPrecision,
    /// Fixed-point with this many fraction digits
    FixedDigits(usize),
    SignificantFigures(usize),
    /// Exponential notation with this many fraction digits
    Exponential(usize),
    /// Round to the nearest multiple of the value
    Nearest(N),
}

/// Untyped value display options, as they arrive from configuration.
///
/// `value_display` is one of `full-precision`, `fixed-digits`,
/// `significant-figures`, `exponential` or `nearest`; each but the first
/// reads one of the remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueFormatOptions<N> {
    pub value_display: String,
    pub digits: Option<usize>,
    pub significant_figures: Option<usize>,
    pub fraction_digits: Option<usize>,
    pub value: Option<N>,
}

impl<N> Default for ValueFormatOptions<N> {
    fn default() -> Self {
        Self {
            value_display: "full-precision".to_string(),
            digits: None,
            significant_figures: None,
            fraction_digits: None,
            value: None,
        }
    }
}

fn missing(display: &str, field: &str) -> MeasureError {
    MeasureError::UnsupportedValueDisplay(format!("{display} requires '{field}'"))
}

impl<N: Numeric> TryFrom<ValueFormatOptions<N>> for ValueDisplay<N> {
    type Error = MeasureError;

    fn try_from(options: ValueFormatOptions<N>) -> Result<Self> {
        let display = options.value_display.as_str();
        match display {
            "full-precision" => Ok(ValueDisplay::FullPrecision),
            "fixed-digits" => options
                .digits
                .map(ValueDisplay::FixedDigits)
                .ok_or_else(|| missing(display, "digits")),
            "significant-figures" => options
                .significant_figures
                .map(ValueDisplay::SignificantFigures)
                .ok_or_else(|| missing(display, "significantFigures")),
            "exponential" => options
                .fraction_digits
                .map(ValueDisplay::Exponential)
                .ok_or_else(|| missing(display, "fractionDigits")),
            "nearest" => options
                .value
                .map(ValueDisplay::Nearest)
                .ok_or_else(|| missing(display, "value")),
            other => Err(MeasureError::UnsupportedValueDisplay(other.to_string())),
        }
    }
}

/// Formats numbers according to a [`ValueDisplay`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormatter<N: Numeric = f64> {
    display: ValueDisplay<N>,
}

impl<N: Numeric> ValueFormatter<N> {
    pub fn new(display: ValueDisplay<N>) -> Self {
        Self { display }
    }

    /// Build from untyped options, rejecting unknown displays
    pub fn from_options(options: ValueFormatOptions<N>) -> Result<Self> {
        Ok(Self::new(ValueDisplay::try_from(options)?))
    }

    pub fn display(&self) -> &ValueDisplay<N> {
        &self.display
    }

    pub fn format(&self, value: &N) -> String {
        match &self.display {
            ValueDisplay::FullPrecision => value.format(),
            ValueDisplay::FixedDigits(digits) => value.to_fixed(*digits),
            ValueDisplay::SignificantFigures(figures) => value.to_precision(*figures),
            ValueDisplay::Exponential(digits) => value.to_exponential(*digits),
            ValueDisplay::Nearest(step) => value.div(step).round().mult(step).format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(json: &str) -> ValueFormatOptions<f64> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_options_to_display() {
        assert_eq!(
            ValueDisplay::try_from(options("{}")).unwrap(),
            ValueDisplay::FullPrecision
        );
        assert_eq!(
            ValueDisplay::try_from(options(r#"{"valueDisplay": "fixed-digits", "digits": 2}"#)).unwrap(),
            ValueDisplay::FixedDigits(2)
        );
        assert_eq!(
            ValueDisplay::try_from(options(r#"{"valueDisplay": "nearest", "value": 0.25}"#)).unwrap(),
            ValueDisplay::Nearest(0.25)
        );
    }

    #[test]
    fn test_unsupported_display() {
        assert!(matches!(
            ValueDisplay::try_from(options(r#"{"valueDisplay": "roman"}"#)),
            Err(MeasureError::UnsupportedValueDisplay(_))
        ));
        assert!(matches!(
            ValueFormatter::from_options(options(r#"{"valueDisplay": "exponential"}"#)),
            Err(MeasureError::UnsupportedValueDisplay(_))
        ));
    }

    #[test]
    fn test_format_styles() {
        let value = 1234.5678_f64;
        assert_eq!(ValueFormatter::new(ValueDisplay::FullPrecision).format(&value), "1234.5678");
        assert_eq!(ValueFormatter::new(ValueDisplay::FixedDigits(1)).format(&value), "1234.6");
        assert_eq!(ValueFormatter::new(ValueDisplay::SignificantFigures(2)).format(&value), "1.2e+3");
        assert_eq!(ValueFormatter::new(ValueDisplay::Exponential(3)).format(&value), "1.235e+3");
    }

    #[test]
    fn test_nearest() {
        let quarter = ValueFormatter::new(ValueDisplay::Nearest(0.25));
        assert_eq!(quarter.format(&3.2808), "3.25");
        assert_eq!(quarter.format(&3.61), "3.5");
        assert_eq!(quarter.format(&0.0), "0");

        let whole = ValueFormatter::new(ValueDisplay::Nearest(1.0));
        assert_eq!(whole.format(&-3.2808), "-3");
        assert_eq!(whole.format(&6.5616), "7");
        // ties go up
        assert_eq!(whole.format(&2.5), "3");
        assert_eq!(whole.format(&-2.5), "-2");
    }

    #[test]
    fn test_rendering_edges() {
        assert_eq!(ValueFormatter::new(ValueDisplay::FullPrecision).format(&1e-7), "1e-7");
        assert_eq!(ValueFormatter::new(ValueDisplay::FullPrecision).format(&f64::INFINITY), "Infinity");
        assert_eq!(ValueFormatter::new(ValueDisplay::FixedDigits(0)).format(&2.5), "3");
        assert_eq!(ValueFormatter::new(ValueDisplay::SignificantFigures(2)).format(&0.125), "0.13");
        assert_eq!(ValueFormatter::new(ValueDisplay::Exponential(1)).format(&1.25), "1.3e+0");
    }
}
