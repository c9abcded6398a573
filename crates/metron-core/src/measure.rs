//! Measures and the operation trees that record how they were built
//!
//! A [`Measure`] is an immutable value object: a coefficient (how many base
//! units it represents), an optional affine constant, a dimension vector and
//! display identifiers. Every derived measure keeps a node describing its
//! construction, and formatting walks those nodes rather than the identifiers.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{MeasureError, Result};
use crate::format::MeasureFormatter;
use crate::numeric::Numeric;
use crate::prefix::{Prefix, PrefixMask};
use crate::unit_system::{DimensionVector, UnitSystem};

/// Display names of a measure
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Identifiers {
    pub name_singular: String,
    pub name_plural: String,
    pub symbol: String,
}

impl Identifiers {
    pub fn new(
        name_singular: impl Into<String>,
        name_plural: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            name_singular: name_singular.into(),
            name_plural: name_plural.into(),
            symbol: symbol.into(),
        }
    }
}

impl<A, B, C> From<(A, B, C)> for Identifiers
where
    A: Into<String>,
    B: Into<String>,
    C: Into<String>,
{
    fn from((singular, plural, symbol): (A, B, C)) -> Self {
        Self::new(singular, plural, symbol)
    }
}

/// How a measure was constructed.
///
/// Operands are shared handles, so `m.squared()` points at `m` twice without
/// copying it.
#[derive(Debug, Clone)]
pub enum Operation<N: Numeric> {
    /// A named unit; formatting uses the measure's own identifiers
    Leaf,
    Prefix {
        measure: Measure<N>,
        multiplier: N,
        name: String,
        symbol: String,
    },
    Times {
        left: Measure<N>,
        right: Measure<N>,
    },
    Over {
        left: Measure<N>,
        right: Measure<N>,
    },
    Pow {
        measure: Measure<N>,
        power: i32,
    },
    Reciprocal {
        measure: Measure<N>,
    },
    /// Renders as `base` when formatted on its own and as `manipulated` when
    /// it appears inside another operation (°C versus Δ°C).
    Superposition {
        base: Measure<N>,
        manipulated: Measure<N>,
    },
}

impl<N: Numeric> Operation<N> {
    /// Tag name, as used in serialised blobs
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Leaf => "leaf",
            Operation::Prefix { .. } => "prefix",
            Operation::Times { .. } => "times",
            Operation::Over { .. } => "over",
            Operation::Pow { .. } => "pow",
            Operation::Reciprocal { .. } => "reciprocal",
            Operation::Superposition { .. } => "superposition",
        }
    }
}

#[derive(Debug)]
struct MeasureInner<N: Numeric> {
    coefficient: N,
    constant: N,
    unit: DimensionVector,
    unit_system: Arc<UnitSystem>,
    identifiers: Identifiers,
    allowed_prefixes: PrefixMask,
    operation: Operation<N>,
}

/// A quantity: `coefficient` base units, optionally offset by `constant`.
///
/// Converting a value of this measure to base units is
/// `(value + constant) * coefficient`. Cloning is cheap; all clones share one
/// node.
#[derive(Debug, Clone)]
pub struct Measure<N: Numeric = f64> {
    inner: Arc<MeasureInner<N>>,
}

/// A precomputed conversion between two compatible measures
#[derive(Debug, Clone, PartialEq)]
pub enum Converter<N: Numeric = f64> {
    Linear {
        factor: N,
    },
    /// `((value + from_constant) * from_coefficient) / to_coefficient - to_constant`
    Affine {
        from_coefficient: N,
        from_constant: N,
        to_coefficient: N,
        to_constant: N,
    },
}

impl<N: Numeric> Converter<N> {
    pub fn convert(&self, value: &N) -> N {
        match self {
            Converter::Linear { factor } => factor.mult(value),
            Converter::Affine {
                from_coefficient,
                from_constant,
                to_coefficient,
                to_constant,
            } => {
                let base = value.add(from_constant).mult(from_coefficient);
                base.div(to_coefficient).sub(to_constant)
            }
        }
    }
}

#[allow(clippy::should_implement_trait)]
impl<N: Numeric> Measure<N> {
    pub(crate) fn from_parts(
        coefficient: N,
        constant: N,
        unit: DimensionVector,
        unit_system: Arc<UnitSystem>,
        identifiers: Identifiers,
        allowed_prefixes: PrefixMask,
        operation: Operation<N>,
    ) -> Self {
        Self {
            inner: Arc::new(MeasureInner {
                coefficient,
                constant,
                unit,
                unit_system,
                identifiers,
                allowed_prefixes,
                operation,
            }),
        }
    }

    /// One base unit of a named dimension
    pub fn dimension(
        unit_system: &Arc<UnitSystem>,
        dimension: &str,
        identifiers: impl Into<Identifiers>,
        allowed_prefixes: PrefixMask,
    ) -> Result<Self> {
        let unit = unit_system.dimension(dimension)?;
        Ok(Self::from_parts(
            N::one(),
            N::zero(),
            unit,
            Arc::clone(unit_system),
            identifiers.into(),
            allowed_prefixes,
            Operation::Leaf,
        ))
    }

    /// A bare number with no dimensions and no name
    pub fn dimensionless(unit_system: &Arc<UnitSystem>, value: N) -> Self {
        Self::from_parts(
            value,
            N::zero(),
            unit_system.dimensionless(),
            Arc::clone(unit_system),
            Identifiers::default(),
            PrefixMask::none(),
            Operation::Leaf,
        )
    }

    /// A named multiple of another measure, e.g. a foot as `0.3048` meters
    pub fn of(
        value: N,
        base: &Measure<N>,
        identifiers: impl Into<Identifiers>,
        allowed_prefixes: PrefixMask,
    ) -> Self {
        Self::from_parts(
            value.mult(base.coefficient()),
            N::zero(),
            base.unit().clone(),
            Arc::clone(base.unit_system()),
            identifiers.into(),
            allowed_prefixes,
            Operation::Leaf,
        )
    }

    /// A named affine unit relative to `base`, e.g. degrees Celsius as
    /// coefficient `1` and constant `273.15` from kelvin.
    pub fn offset_from(
        base: &Measure<N>,
        coefficient: N,
        constant: N,
        identifiers: impl Into<Identifiers>,
        allowed_prefixes: PrefixMask,
    ) -> Self {
        Self::from_parts(
            coefficient.mult(base.coefficient()),
            constant,
            base.unit().clone(),
            Arc::clone(base.unit_system()),
            identifiers.into(),
            allowed_prefixes,
            Operation::Leaf,
        )
    }

    pub fn coefficient(&self) -> &N {
        &self.inner.coefficient
    }

    pub fn constant(&self) -> &N {
        &self.inner.constant
    }

    pub fn unit(&self) -> &DimensionVector {
        &self.inner.unit
    }

    pub fn unit_system(&self) -> &Arc<UnitSystem> {
        &self.inner.unit_system
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.inner.identifiers
    }

    pub fn allowed_prefixes(&self) -> &PrefixMask {
        &self.inner.allowed_prefixes
    }

    pub fn operation(&self) -> &Operation<N> {
        &self.inner.operation
    }

    /// True when both handles point at the same node
    pub fn ptr_eq(&self, other: &Measure<N>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Same unit system and identical dimension vector
    pub fn is_compatible_with(&self, other: &Measure<N>) -> bool {
        let same_system = Arc::ptr_eq(self.unit_system(), other.unit_system())
            || self.unit_system() == other.unit_system();
        same_system && self.unit() == other.unit()
    }

    fn ensure_compatible(&self, other: &Measure<N>) -> Result<()> {
        if self.is_compatible_with(other) {
            Ok(())
        } else {
            Err(MeasureError::DimensionMismatch {
                left: self.unit_system().describe(self.unit()),
                right: other.unit_system().describe(other.unit()),
            })
        }
    }

    /// A leaf sharing this measure's names and prefix mask but with a new
    /// coefficient
    fn relabelled(&self, coefficient: N) -> Self {
        Self::from_parts(
            coefficient,
            N::zero(),
            self.unit().clone(),
            Arc::clone(self.unit_system()),
            self.identifiers().clone(),
            self.allowed_prefixes().clone(),
            Operation::Leaf,
        )
    }

    /// An unnamed, unprefixable node
    fn derived(&self, coefficient: N, unit: DimensionVector, operation: Operation<N>) -> Self {
        Self::from_parts(
            coefficient,
            N::zero(),
            unit,
            Arc::clone(self.unit_system()),
            Identifiers::default(),
            PrefixMask::none(),
            operation,
        )
    }

    pub fn plus(&self, other: &Measure<N>) -> Result<Self> {
        self.ensure_compatible(other)?;
        Ok(self.relabelled(self.coefficient().add(other.coefficient())))
    }

    pub fn minus(&self, other: &Measure<N>) -> Result<Self> {
        self.ensure_compatible(other)?;
        Ok(self.relabelled(self.coefficient().sub(other.coefficient())))
    }

    pub fn negate(&self) -> Self {
        self.relabelled(self.coefficient().neg())
    }

    pub fn scale(&self, value: &N) -> Self {
        self.relabelled(self.coefficient().mult(value))
    }

    pub fn times(&self, other: &Measure<N>) -> Self {
        self.derived(
            self.coefficient().mult(other.coefficient()),
            self.unit_system().multiply(self.unit(), other.unit()),
            Operation::Times {
                left: self.clone(),
                right: other.clone(),
            },
        )
    }

    pub fn over(&self, other: &Measure<N>) -> Self {
        self.derived(
            self.coefficient().div(other.coefficient()),
            self.unit_system().divide(self.unit(), other.unit()),
            Operation::Over {
                left: self.clone(),
                right: other.clone(),
            },
        )
    }

    /// Alias of [`Measure::over`]
    pub fn per(&self, other: &Measure<N>) -> Self {
        self.over(other)
    }

    /// Alias of [`Measure::over`]
    pub fn div(&self, other: &Measure<N>) -> Self {
        self.over(other)
    }

    pub fn pow(&self, power: i32) -> Self {
        self.derived(
            self.coefficient().pow(power),
            self.unit_system().pow(self.unit(), power),
            Operation::Pow {
                measure: self.clone(),
                power,
            },
        )
    }

    pub fn squared(&self) -> Self {
        self.pow(2)
    }

    pub fn cubed(&self) -> Self {
        self.pow(3)
    }

    pub fn reciprocal(&self) -> Self {
        self.derived(
            self.coefficient().reciprocal(),
            self.unit_system().reciprocal(self.unit()),
            Operation::Reciprocal {
                measure: self.clone(),
            },
        )
    }

    /// Alias of [`Measure::reciprocal`]
    pub fn inverse(&self) -> Self {
        self.reciprocal()
    }

    /// [`Measure::times`], or `None` when the coefficient or an exponent
    /// overflows
    pub fn checked_times(&self, other: &Measure<N>) -> Option<Self> {
        Some(self.derived(
            self.coefficient().checked_mult(other.coefficient())?,
            self.unit().checked_multiply(other.unit())?,
            Operation::Times {
                left: self.clone(),
                right: other.clone(),
            },
        ))
    }

    /// [`Measure::over`], or `None` when the coefficient or an exponent
    /// overflows
    pub fn checked_over(&self, other: &Measure<N>) -> Option<Self> {
        Some(self.derived(
            self.coefficient().checked_div(other.coefficient())?,
            self.unit().checked_divide(other.unit())?,
            Operation::Over {
                left: self.clone(),
                right: other.clone(),
            },
        ))
    }

    /// [`Measure::pow`], or `None` when the coefficient or an exponent
    /// overflows
    pub fn checked_pow(&self, power: i32) -> Option<Self> {
        Some(self.derived(
            self.coefficient().checked_pow(power)?,
            self.unit().checked_pow(power)?,
            Operation::Pow {
                measure: self.clone(),
                power,
            },
        ))
    }

    pub(crate) fn with_prefix(&self, prefix: &Prefix<N>) -> Self {
        let ids = self.identifiers();
        Self::from_parts(
            self.coefficient().mult(&prefix.multiplier),
            self.constant().clone(),
            self.unit().clone(),
            Arc::clone(self.unit_system()),
            Identifiers::new(
                format!("{}{}", prefix.name, ids.name_singular),
                format!("{}{}", prefix.name, ids.name_plural),
                format!("{}{}", prefix.symbol, ids.symbol),
            ),
            PrefixMask::none(),
            Operation::Prefix {
                measure: self.clone(),
                multiplier: prefix.multiplier.clone(),
                name: prefix.name.clone(),
                symbol: prefix.symbol.clone(),
            },
        )
    }

    /// Rename this measure. The result formats as a leaf; coefficient,
    /// constant and unit are unchanged. `None` allows no prefixes.
    pub fn with_identifiers(
        &self,
        identifiers: impl Into<Identifiers>,
        allowed_prefixes: Option<PrefixMask>,
    ) -> Self {
        Self::from_parts(
            self.coefficient().clone(),
            self.constant().clone(),
            self.unit().clone(),
            Arc::clone(self.unit_system()),
            identifiers.into(),
            allowed_prefixes.unwrap_or_default(),
            Operation::Leaf,
        )
    }

    /// Wrap `base` so that it formats as itself at the top level and as
    /// `manipulated` wherever it is nested in another operation. The node
    /// keeps `base`'s coefficient, constant and names.
    pub fn superposition(base: &Measure<N>, manipulated: &Measure<N>) -> Result<Self> {
        base.ensure_compatible(manipulated)?;
        Ok(Self::from_parts(
            base.coefficient().clone(),
            base.constant().clone(),
            base.unit().clone(),
            Arc::clone(base.unit_system()),
            base.identifiers().clone(),
            base.allowed_prefixes().clone(),
            Operation::Superposition {
                base: base.clone(),
                manipulated: manipulated.clone(),
            },
        ))
    }

    /// `self` when formatted alone, `difference` once combined with other
    /// units
    pub fn redirect_if_manipulated(&self, difference: &Measure<N>) -> Result<Self> {
        Self::superposition(self, difference)
    }

    pub fn compare(&self, other: &Measure<N>) -> Result<Ordering> {
        self.ensure_compatible(other)?;
        Ok(self.coefficient().compare(other.coefficient()))
    }

    pub fn lt(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn lte(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn eq(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    pub fn neq(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Equal)
    }

    pub fn gte(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    pub fn gt(&self, other: &Measure<N>) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// Build a converter from values in this measure to values in `target`.
    ///
    /// Affine arithmetic is only used when either side carries a constant.
    pub fn create_converter_to(&self, target: &Measure<N>) -> Result<Converter<N>> {
        self.ensure_compatible(target)?;

        if self.constant().is_zero() && target.constant().is_zero() {
            return Ok(Converter::Linear {
                factor: self.coefficient().div(target.coefficient()),
            });
        }

        Ok(Converter::Affine {
            from_coefficient: self.coefficient().clone(),
            from_constant: self.constant().clone(),
            to_coefficient: target.coefficient().clone(),
            to_constant: target.constant().clone(),
        })
    }

    /// Render the operation tree with `formatter`
    pub fn format<F: MeasureFormatter>(&self, plural: bool, formatter: &F) -> F::Output {
        self.format_node(plural, formatter, None)
    }

    fn format_node<F: MeasureFormatter>(
        &self,
        plural: bool,
        formatter: &F,
        root: Option<&Measure<N>>,
    ) -> F::Output {
        let child_root = Some(root.unwrap_or(self));

        match self.operation() {
            Operation::Leaf => formatter.leaf(plural, self.identifiers()),
            Operation::Prefix {
                measure,
                name,
                symbol,
                ..
            } => {
                let inner = measure.format_node(plural, formatter, child_root);
                formatter.prefix(inner, name, symbol)
            }
            Operation::Times { left, right } => {
                // only the last factor of a product is pluralised
                let left = left.format_node(false, formatter, child_root);
                let right = right.format_node(plural, formatter, child_root);
                formatter.times(left, right)
            }
            Operation::Over { left, right } => {
                let numerator = left.format_node(plural, formatter, child_root);
                let mut denominator = right.format_node(false, formatter, child_root);
                if matches!(right.operation(), Operation::Times { .. }) {
                    denominator = formatter.parentheses(denominator);
                }
                formatter.over(numerator, denominator)
            }
            Operation::Pow { measure, power } => {
                let mut inner = measure.format_node(plural, formatter, child_root);
                if matches!(measure.operation(), Operation::Times { .. }) {
                    inner = formatter.parentheses(inner);
                }
                formatter.pow(inner, *power)
            }
            Operation::Reciprocal { measure } => {
                let inner = measure.format_node(plural, formatter, child_root);
                formatter.reciprocal(inner)
            }
            Operation::Superposition { base, manipulated } => {
                let collapsed = match root {
                    Some(root) if !root.ptr_eq(self) => manipulated,
                    _ => base,
                };
                collapsed.format_node(plural, formatter, None)
            }
        }
    }
}
