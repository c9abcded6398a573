//! Dimensions and the unit systems that own them
//!
//! A unit system is a fixed, ordered list of dimensions (length, mass, ...),
//! each with the symbol of its base unit. Every dimension vector produced by a
//! system carries an exponent for every dimension, zero-filled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{MeasureError, Result};

/// A named dimension and the symbol of its base unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub symbol: String,
}

/// Integer exponents over the dimensions of one unit system.
///
/// The exponents are stored in the order the unit system declares its
/// dimensions. Arithmetic between two vectors of the same basis always
/// yields another vector of that basis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionVector {
    exponents: Vec<i32>,
}

impl DimensionVector {
    /// Exponents in dimension order
    pub fn exponents(&self) -> &[i32] {
        &self.exponents
    }

    /// True when every exponent is zero
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| *e == 0)
    }

    /// Product of two units: elementwise sum.
    ///
    /// Exponents saturate at the `i32` bounds; [`DimensionVector::checked_multiply`]
    /// reports the overflow instead.
    pub fn multiply(&self, other: &DimensionVector) -> DimensionVector {
        self.zip_with(other, i32::saturating_add)
    }

    /// Quotient of two units: elementwise difference
    pub fn divide(&self, other: &DimensionVector) -> DimensionVector {
        self.zip_with(other, i32::saturating_sub)
    }

    /// Unit raised to an integer power: scalar multiple
    pub fn pow(&self, power: i32) -> DimensionVector {
        DimensionVector {
            exponents: self.exponents.iter().map(|e| e.saturating_mul(power)).collect(),
        }
    }

    /// Reciprocal unit: negation
    pub fn reciprocal(&self) -> DimensionVector {
        DimensionVector {
            exponents: self.exponents.iter().map(|e| e.saturating_neg()).collect(),
        }
    }

    /// `None` when an exponent overflows
    pub fn checked_multiply(&self, other: &DimensionVector) -> Option<DimensionVector> {
        self.checked_zip_with(other, i32::checked_add)
    }

    pub fn checked_divide(&self, other: &DimensionVector) -> Option<DimensionVector> {
        self.checked_zip_with(other, i32::checked_sub)
    }

    pub fn checked_pow(&self, power: i32) -> Option<DimensionVector> {
        let exponents = self
            .exponents
            .iter()
            .map(|e| e.checked_mul(power))
            .collect::<Option<Vec<i32>>>()?;
        Some(DimensionVector { exponents })
    }

    fn zip_with(&self, other: &DimensionVector, op: impl Fn(i32, i32) -> i32) -> DimensionVector {
        DimensionVector {
            exponents: self.aligned(other).map(|(a, b)| op(a, b)).collect(),
        }
    }

    fn checked_zip_with(
        &self,
        other: &DimensionVector,
        op: impl Fn(i32, i32) -> Option<i32>,
    ) -> Option<DimensionVector> {
        let exponents = self
            .aligned(other)
            .map(|(a, b)| op(a, b))
            .collect::<Option<Vec<i32>>>()?;
        Some(DimensionVector { exponents })
    }

    /// Exponent pairs, zero-filling the shorter vector
    fn aligned<'a>(&'a self, other: &'a DimensionVector) -> impl Iterator<Item = (i32, i32)> + 'a {
        let len = self.exponents.len().max(other.exponents.len());
        let at = |v: &[i32], i: usize| v.get(i).copied().unwrap_or(0);
        (0..len).map(move |i| (at(&self.exponents, i), at(&other.exponents, i)))
    }
}

/// An immutable set of dimensions with base-unit symbols.
///
/// Shared between measures through an `Arc`; measures never own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSystem {
    dimensions: Vec<Dimension>,
}

impl UnitSystem {
    /// Create a unit system from `(dimension, base unit symbol)` pairs.
    ///
    /// ```
    /// use metron_core::UnitSystem;
    ///
    /// let si = UnitSystem::new([("length", "m"), ("mass", "g"), ("time", "s")]);
    /// assert_eq!(si.symbol("mass").unwrap(), "g");
    /// ```
    pub fn new<I, K, V>(dimensions: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Arc::new(Self::from_dimensions(
            dimensions
                .into_iter()
                .map(|(name, symbol)| Dimension {
                    name: name.into(),
                    symbol: symbol.into(),
                })
                .collect(),
        ))
    }

    pub(crate) fn from_dimensions(dimensions: Vec<Dimension>) -> Self {
        Self { dimensions }
    }

    /// All dimensions in declaration order
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Symbol of the base unit of a dimension
    pub fn symbol(&self, dimension: &str) -> Result<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == dimension)
            .map(|d| d.symbol.as_str())
            .ok_or_else(|| MeasureError::UnknownDimension(dimension.to_string()))
    }

    /// A vector with every exponent zero
    pub fn dimensionless(&self) -> DimensionVector {
        DimensionVector {
            exponents: vec![0; self.dimensions.len()],
        }
    }

    /// A vector with exponent 1 at `dimension` and 0 elsewhere
    pub fn dimension(&self, dimension: &str) -> Result<DimensionVector> {
        let index = self.index_of(dimension)?;
        let mut exponents = vec![0; self.dimensions.len()];
        exponents[index] = 1;
        Ok(DimensionVector { exponents })
    }

    pub fn multiply(&self, left: &DimensionVector, right: &DimensionVector) -> DimensionVector {
        left.multiply(right)
    }

    pub fn divide(&self, left: &DimensionVector, right: &DimensionVector) -> DimensionVector {
        left.divide(right)
    }

    pub fn pow(&self, unit: &DimensionVector, power: i32) -> DimensionVector {
        unit.pow(power)
    }

    pub fn reciprocal(&self, unit: &DimensionVector) -> DimensionVector {
        unit.reciprocal()
    }

    /// Name the exponents of a vector, skipping nothing
    pub fn named_exponents(&self, unit: &DimensionVector) -> BTreeMap<String, i32> {
        self.dimensions
            .iter()
            .zip(unit.exponents.iter().chain(std::iter::repeat(&0)))
            .map(|(d, e)| (d.name.clone(), *e))
            .collect()
    }

    /// Rebuild a vector from named exponents; missing dimensions are zero
    pub fn vector_from_named(&self, named: &BTreeMap<String, i32>) -> Result<DimensionVector> {
        let mut exponents = vec![0; self.dimensions.len()];
        for (name, exponent) in named {
            exponents[self.index_of(name)?] = *exponent;
        }
        Ok(DimensionVector { exponents })
    }

    /// Render a vector in base units, e.g. `m·s⁻²`
    pub fn describe(&self, unit: &DimensionVector) -> String {
        let parts: Vec<String> = self
            .dimensions
            .iter()
            .zip(unit.exponents.iter())
            .filter(|(_, e)| **e != 0)
            .map(|(d, e)| {
                if *e == 1 {
                    d.symbol.clone()
                } else {
                    format!("{}{}", d.symbol, crate::format::superscript(*e))
                }
            })
            .collect();

        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("·")
        }
    }

    fn index_of(&self, dimension: &str) -> Result<usize> {
        self.dimensions
            .iter()
            .position(|d| d.name == dimension)
            .ok_or_else(|| MeasureError::UnknownDimension(dimension.to_string()))
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.dimensions.iter().map(|d| d.symbol.as_str()).collect();
        write!(f, "[{}]", symbols.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> Arc<UnitSystem> {
        UnitSystem::new([("length", "m"), ("mass", "g"), ("time", "s")])
    }

    #[test]
    fn test_dimension_vectors() {
        let si = system();
        assert_eq!(si.dimensionless().exponents(), &[0, 0, 0]);
        assert_eq!(si.dimension("time").unwrap().exponents(), &[0, 0, 1]);
        assert!(si.dimensionless().is_dimensionless());
    }

    #[test]
    fn test_vector_arithmetic() {
        let si = system();
        let length = si.dimension("length").unwrap();
        let time = si.dimension("time").unwrap();

        let speed = si.divide(&length, &time);
        assert_eq!(speed.exponents(), &[1, 0, -1]);

        let acceleration = si.divide(&speed, &time);
        assert_eq!(acceleration.exponents(), &[1, 0, -2]);
        assert_eq!(si.pow(&acceleration, 2).exponents(), &[2, 0, -4]);
        assert_eq!(si.reciprocal(&acceleration).exponents(), &[-1, 0, 2]);
        assert_eq!(si.multiply(&speed, &time), length);
    }

    #[test]
    fn test_exponent_overflow() {
        let si = system();
        let length = si.dimension("length").unwrap();
        let huge = length.pow(i32::MAX);

        assert_eq!(huge.checked_multiply(&length), None);
        assert_eq!(huge.checked_pow(2), None);
        assert_eq!(huge.reciprocal().checked_divide(&length.pow(2)), None);
        assert_eq!(length.checked_pow(3).unwrap().exponents(), &[3, 0, 0]);
        assert_eq!(huge.checked_divide(&length).unwrap().exponents(), &[i32::MAX - 1, 0, 0]);

        // the unchecked forms pin to the bound
        assert_eq!(huge.multiply(&length).exponents(), &[i32::MAX, 0, 0]);
        assert_eq!(huge.pow(-2).exponents(), &[i32::MIN, 0, 0]);
    }

    #[test]
    fn test_reciprocal_keeps_zero() {
        let si = system();
        let r = si.reciprocal(&si.dimensionless());
        assert_eq!(r, si.dimensionless());
    }

    #[test]
    fn test_unknown_dimension() {
        let si = system();
        assert!(matches!(
            si.symbol("luminosity"),
            Err(MeasureError::UnknownDimension(_))
        ));
        assert!(si.dimension("luminosity").is_err());
    }

    #[test]
    fn test_named_round_trip() {
        let si = system();
        let unit = si.divide(&si.dimension("length").unwrap(), &si.dimension("time").unwrap());
        let named = si.named_exponents(&unit);
        assert_eq!(named.get("time"), Some(&-1));
        assert_eq!(si.vector_from_named(&named).unwrap(), unit);
    }

    #[test]
    fn test_describe() {
        let si = system();
        let unit = si.divide(
            &si.dimension("length").unwrap(),
            &si.pow(&si.dimension("time").unwrap(), 2),
        );
        assert_eq!(si.describe(&unit), "m·s⁻²");
        assert_eq!(si.describe(&si.dimensionless()), "1");
    }
}
