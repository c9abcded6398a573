//! Exponent suffix parser using pest

use pest::Parser;
use pest_derive::Parser;

use crate::format::parse_superscript;

#[derive(Parser)]
#[grammar = "autocomplete/exponent.pest"]
struct ExponentParser;

/// Parse an exponent at the start of `text`.
///
/// Returns the power and the number of bytes it spans. A power of zero is
/// not an exponent.
pub(crate) fn leading_exponent(text: &str) -> Option<(i32, usize)> {
    let pair = ExponentParser::parse(Rule::exponent, text).ok()?.next()?;
    let consumed = pair.as_span().end();
    let inner = pair.into_inner().next()?;

    let power = match inner.as_rule() {
        Rule::digit_power => inner.into_inner().next()?.as_str().parse().ok()?,
        Rule::superscript_power => parse_superscript(inner.as_str())?,
        _ => return None,
    };

    (power != 0).then_some((power, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret() {
        assert_eq!(leading_exponent("^2"), Some((2, 2)));
        assert_eq!(leading_exponent("^-1/s"), Some((-1, 3)));
        assert_eq!(leading_exponent("3"), Some((3, 1)));
    }

    #[test]
    fn test_superscript() {
        assert_eq!(leading_exponent("²"), Some((2, "²".len())));
        assert_eq!(leading_exponent("⁻¹²"), Some((-12, "⁻¹²".len())));
    }

    #[test]
    fn test_not_an_exponent() {
        assert_eq!(leading_exponent("s^2"), None);
        assert_eq!(leading_exponent("^"), None);
        assert_eq!(leading_exponent("^0"), None);
        assert_eq!(leading_exponent(""), None);
    }

    #[test]
    fn test_three_digits_at_most() {
        assert_eq!(leading_exponent("^999"), Some((999, 4)));
        assert_eq!(leading_exponent("-999"), Some((-999, 4)));
        assert_eq!(leading_exponent("^65536"), None);
        assert_eq!(leading_exponent("1234"), None);
        assert_eq!(leading_exponent("¹²³⁴"), None);
    }
}
