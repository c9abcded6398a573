//! Best-fit and mixed-radix formatting across several candidate units

use std::cmp::Ordering;

use super::value::{ValueDisplay, ValueFormatter};
use super::MeasureFormatter;
use crate::error::{MeasureError, Result};
use crate::measure::{Converter, Measure};
use crate::numeric::Numeric;

/// A value expressed in one candidate unit
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue<N, R> {
    pub converted: N,
    pub formatted: String,
    pub measure: R,
}

/// A candidate unit with its converters and pre-rendered names
#[derive(Debug, Clone)]
struct Candidate<N: Numeric, R> {
    to: Converter<N>,
    back: Converter<N>,
    singular: R,
    plural: R,
    values: ValueFormatter<N>,
}

impl<N: Numeric, R: Clone> Candidate<N, R> {
    fn new<F>(
        source: &Measure<N>,
        target: &Measure<N>,
        values: ValueFormatter<N>,
        formatter: &F,
    ) -> Result<Self>
    where
        F: MeasureFormatter<Output = R>,
    {
        Ok(Self {
            to: source.create_converter_to(target)?,
            back: target.create_converter_to(source)?,
            singular: target.format(false, formatter),
            plural: target.format(true, formatter),
            values,
        })
    }

    fn entry(&self, converted: N) -> FormattedValue<N, R> {
        let measure = if converted.compare(&N::one()) == Ordering::Equal {
            self.singular.clone()
        } else {
            self.plural.clone()
        };
        FormattedValue {
            formatted: self.values.format(&converted),
            converted,
            measure,
        }
    }
}

/// Candidates sorted largest coefficient first, split into the larger units
/// and the smallest one
fn sorted_candidates<N: Numeric>(candidates: &[Measure<N>]) -> Result<(Vec<Measure<N>>, Measure<N>)> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.coefficient().compare(a.coefficient()));
    let smallest = sorted.pop().ok_or(MeasureError::EmptyCandidates)?;
    Ok((sorted, smallest))
}

/// Picks the largest candidate unit in which a value is at least one.
///
/// ```
/// use metron_core::{DynamicFormatter, Measure, Prefix, PrefixMask, StringFormatter, UnitSystem, ValueDisplay};
///
/// let si = UnitSystem::new([("length", "m")]);
/// let meters: Measure = Measure::dimension(&si, "length", ("meter", "meters", "m"), PrefixMask::new(["PREFIX_SI"])).unwrap();
/// let kilo = Prefix::new("kilo", "k", 1e3, PrefixMask::new(["PREFIX_SI"]));
///
/// let auto = DynamicFormatter::new(
///     &meters,
///     &[meters.clone(), kilo.apply(&meters).unwrap()],
///     ValueDisplay::FullPrecision,
///     &StringFormatter::symbols(),
/// )
/// .unwrap();
///
/// let shown = auto.format(&2500.0);
/// assert_eq!(format!("{}{}", shown.formatted, shown.measure), "2.5km");
/// ```
#[derive(Debug, Clone)]
pub struct DynamicFormatter<N: Numeric, R> {
    larger: Vec<Candidate<N, R>>,
    smallest: Candidate<N, R>,
}

impl<N: Numeric, R: Clone> DynamicFormatter<N, R> {
    /// `source` is the unit values are given in; it must be compatible with
    /// every candidate.
    pub fn new<F>(
        source: &Measure<N>,
        candidates: &[Measure<N>],
        value_display: ValueDisplay<N>,
        formatter: &F,
    ) -> Result<Self>
    where
        F: MeasureFormatter<Output = R>,
    {
        let (larger, smallest) = sorted_candidates(candidates)?;
        let values = ValueFormatter::new(value_display);

        Ok(Self {
            larger: larger
                .iter()
                .map(|target| Candidate::new(source, target, values.clone(), formatter))
                .collect::<Result<_>>()?,
            smallest: Candidate::new(source, &smallest, values, formatter)?,
        })
    }

    pub fn format(&self, value: &N) -> FormattedValue<N, R> {
        for candidate in &self.larger {
            let converted = candidate.to.convert(value);
            if converted.compare(&N::one()) != Ordering::Less {
                return candidate.entry(converted);
            }
        }
        self.smallest.entry(self.smallest.to.convert(value))
    }
}

/// Breaks a value down across several units, e.g. feet and inches.
///
/// Every unit but the smallest takes a whole number, rendered to the nearest
/// one; the smallest takes the remainder with the caller's value display.
#[derive(Debug, Clone)]
pub struct MultiUnitFormatter<N: Numeric, R> {
    larger: Vec<Candidate<N, R>>,
    smallest: Candidate<N, R>,
    keep_zeros: bool,
}

impl<N: Numeric, R: Clone> MultiUnitFormatter<N, R> {
    pub fn new<F>(
        source: &Measure<N>,
        candidates: &[Measure<N>],
        value_display: ValueDisplay<N>,
        formatter: &F,
        keep_zeros: bool,
    ) -> Result<Self>
    where
        F: MeasureFormatter<Output = R>,
    {
        let (larger, smallest) = sorted_candidates(candidates)?;
        let whole = ValueFormatter::new(ValueDisplay::Nearest(N::one()));

        Ok(Self {
            larger: larger
                .iter()
                .map(|target| Candidate::new(source, target, whole.clone(), formatter))
                .collect::<Result<_>>()?,
            smallest: Candidate::new(source, &smallest, ValueFormatter::new(value_display), formatter)?,
            keep_zeros,
        })
    }

    pub fn format(&self, value: &N) -> Vec<FormattedValue<N, R>> {
        if self.larger.is_empty() {
            return vec![self.smallest.entry(self.smallest.to.convert(value))];
        }

        let one = N::one();
        let zero = N::zero();

        // the sign goes on the first emitted entry only
        let mut multiplier = if value.compare(&zero) == Ordering::Less {
            one.neg()
        } else {
            one.clone()
        };
        let mut bucket = value.abs();
        let mut result = Vec::new();

        for candidate in &self.larger {
            let converted = candidate.to.convert(&bucket);

            if converted.compare(&one) != Ordering::Less {
                let floored = converted.floor();
                result.push(candidate.entry(floored.mult(&multiplier)));
                multiplier = one.clone();
                bucket = bucket.sub(&candidate.back.convert(&floored));
            } else if self.keep_zeros {
                result.push(candidate.entry(zero.clone()));
            }
        }

        let remainder = self.smallest.to.convert(&bucket);
        if remainder.compare(&zero) == Ordering::Greater || result.is_empty() {
            result.push(self.smallest.entry(remainder.mult(&multiplier)));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::StringFormatter;
    use crate::{PrefixMask, UnitSystem};
    use pretty_assertions::assert_eq;

    fn lengths() -> (Measure, Measure, Measure) {
        let si = UnitSystem::new([("length", "m")]);
        let meters = Measure::dimension(&si, "length", ("meter", "meters", "m"), PrefixMask::none()).unwrap();
        let feet = Measure::of(0.3048, &meters, ("foot", "feet", "ft"), PrefixMask::none());
        let inches = Measure::of(1.0 / 12.0, &feet, ("inch", "inches", "in"), PrefixMask::none());
        (meters, feet, inches)
    }

    #[test]
    fn test_empty_candidates() {
        let (meters, _, _) = lengths();
        let symbols = StringFormatter::symbols();
        assert!(matches!(
            DynamicFormatter::new(&meters, &[], ValueDisplay::FullPrecision, &symbols),
            Err(MeasureError::EmptyCandidates)
        ));
        assert!(matches!(
            MultiUnitFormatter::new(&meters, &[], ValueDisplay::FullPrecision, &symbols, false),
            Err(MeasureError::EmptyCandidates)
        ));
    }

    #[test]
    fn test_dynamic_falls_back_to_smallest() {
        let (meters, feet, inches) = lengths();
        let auto = DynamicFormatter::new(
            &meters,
            &[inches, feet],
            ValueDisplay::FixedDigits(2),
            &StringFormatter::names(),
        )
        .unwrap();

        let shown = auto.format(&0.0127);
        assert_eq!(shown.formatted, "0.50");
        assert_eq!(shown.measure, "inches");

        let shown = auto.format(&0.6096);
        assert_eq!(shown.formatted, "2.00");
        assert_eq!(shown.measure, "feet");
    }

    #[test]
    fn test_negative_sign_on_first_entry() {
        let (meters, feet, inches) = lengths();
        let breakdown = MultiUnitFormatter::new(
            &meters,
            &[feet, inches],
            ValueDisplay::Nearest(1.0),
            &StringFormatter::symbols(),
            false,
        )
        .unwrap();

        let parts = breakdown.format(&-1.0);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].formatted, "-3");
        assert_eq!(parts[1].formatted, "3");
        assert!(parts[1].converted > 0.0);
    }

    #[test]
    fn test_keep_zeros() {
        let (meters, feet, inches) = lengths();
        let breakdown = MultiUnitFormatter::new(
            &meters,
            &[feet, inches],
            ValueDisplay::Nearest(1.0),
            &StringFormatter::symbols(),
            true,
        )
        .unwrap();

        let parts = breakdown.format(&0.0508);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].formatted, "0");
        assert_eq!(parts[0].measure, "ft");
        assert_eq!(parts[1].formatted, "2");
    }

    #[test]
    fn test_single_candidate_direct() {
        let (meters, feet, _) = lengths();
        let breakdown = MultiUnitFormatter::new(
            &meters,
            &[feet],
            ValueDisplay::FixedDigits(1),
            &StringFormatter::symbols(),
            false,
        )
        .unwrap();

        let parts = breakdown.format(&-1.0);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].formatted, "-3.3");
    }
}
