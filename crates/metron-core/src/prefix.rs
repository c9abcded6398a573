//! Unit prefixes and the capability masks that gate them

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{MeasureError, Result};
use crate::measure::{Measure, Operation};
use crate::numeric::Numeric;

/// Set of prefix categories (e.g. `"PREFIX_SI"`, `"PREFIX_BINARY"`).
///
/// On a measure it lists the categories that may still be applied. On a
/// prefix it lists the categories the prefix requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PrefixMask {
    flags: BTreeSet<String>,
}

impl PrefixMask {
    /// The empty mask: no prefix may be applied
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// First flag of `self` that `allowed` lacks
    fn first_missing_from(&self, allowed: &PrefixMask) -> Option<&str> {
        self.flags().find(|flag| !allowed.contains(flag))
    }
}

impl fmt::Display for PrefixMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<&str> = self.flags().collect();
        write!(f, "{{{}}}", flags.join(", "))
    }
}

/// A named multiplier that can be applied to measures whose allowed mask
/// covers the prefix's own mask.
///
/// ```
/// use metron_core::{Measure, Prefix, PrefixMask, StringFormatter, UnitSystem};
///
/// let si = UnitSystem::new([("length", "m")]);
/// let meters = Measure::<f64>::dimension(
///     &si,
///     "length",
///     ("meter", "meters", "m"),
///     PrefixMask::new(["PREFIX_SI"]),
/// )
/// .unwrap();
/// let kilo = Prefix::new("kilo", "k", 1e3, PrefixMask::new(["PREFIX_SI"]));
///
/// let km = kilo.apply(&meters).unwrap();
/// assert_eq!(km.format(true, &StringFormatter::symbols()), "km");
/// assert!(kilo.apply(&km).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix<N: Numeric = f64> {
    pub name: String,
    pub symbol: String,
    pub multiplier: N,
    pub mask: PrefixMask,
}

impl<N: Numeric> Prefix<N> {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        multiplier: N,
        mask: PrefixMask,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            multiplier,
            mask,
        }
    }

    /// Whether [`Prefix::apply`] would succeed on `measure`
    pub fn can_apply(&self, measure: &Measure<N>) -> bool {
        self.check(measure).is_ok()
    }

    /// Prefix a measure: scale its coefficient, prepend name and symbol,
    /// clear its prefix mask and record a prefix node.
    pub fn apply(&self, measure: &Measure<N>) -> Result<Measure<N>> {
        self.check(measure)?;
        Ok(measure.with_prefix(self))
    }

    fn check(&self, measure: &Measure<N>) -> Result<()> {
        if let Some(flag) = self.mask.first_missing_from(measure.allowed_prefixes()) {
            return Err(MeasureError::PrefixNotPermitted {
                prefix: self.name.clone(),
                flag: flag.to_string(),
                measure: measure.identifiers().name_plural.clone(),
            });
        }

        match measure.operation() {
            Operation::Leaf | Operation::Pow { .. } => Ok(()),
            other => Err(MeasureError::MalformedTree(format!(
                "prefix '{}' cannot wrap a {} node",
                self.name,
                other.kind()
            ))),
        }
    }
}
