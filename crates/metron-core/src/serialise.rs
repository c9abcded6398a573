//! Serialised form of a measure and its operation tree
//!
//! The blob mirrors the tree shape: every node carries its full measure data
//! and an `operation` tagged with `type`. Unit vectors are stored by dimension
//! name, and the unit system travels with every node.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{MeasureError, Result};
use crate::measure::{Identifiers, Measure, Operation};
use crate::numeric::Numeric;
use crate::prefix::PrefixMask;
use crate::unit_system::{Dimension, UnitSystem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialisedMeasure<N> {
    pub coefficient: N,
    pub constant: N,
    /// Exponent per dimension name
    pub unit: BTreeMap<String, i32>,
    pub unit_system: Vec<Dimension>,
    pub name_singular: String,
    pub name_plural: String,
    pub symbol: String,
    pub allowed_prefixes: Vec<String>,
    pub operation: SerialisedOperation<N>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SerialisedOperation<N> {
    Leaf,
    Prefix {
        measure: Box<SerialisedMeasure<N>>,
        multiplier: N,
        name: String,
        symbol: String,
    },
    Times {
        left: Box<SerialisedMeasure<N>>,
        right: Box<SerialisedMeasure<N>>,
    },
    Over {
        left: Box<SerialisedMeasure<N>>,
        right: Box<SerialisedMeasure<N>>,
    },
    Pow {
        measure: Box<SerialisedMeasure<N>>,
        power: i32,
    },
    Reciprocal {
        measure: Box<SerialisedMeasure<N>>,
    },
    Superposition {
        base: Box<SerialisedMeasure<N>>,
        manipulated: Box<SerialisedMeasure<N>>,
    },
}

impl<N: Numeric> Measure<N> {
    pub fn serialise(&self) -> SerialisedMeasure<N> {
        let boxed = |m: &Measure<N>| Box::new(m.serialise());
        let ids = self.identifiers();

        let operation = match self.operation() {
            Operation::Leaf => SerialisedOperation::Leaf,
            Operation::Prefix {
                measure,
                multiplier,
                name,
                symbol,
            } => SerialisedOperation::Prefix {
                measure: boxed(measure),
                multiplier: multiplier.clone(),
                name: name.clone(),
                symbol: symbol.clone(),
            },
            Operation::Times { left, right } => SerialisedOperation::Times {
                left: boxed(left),
                right: boxed(right),
            },
            Operation::Over { left, right } => SerialisedOperation::Over {
                left: boxed(left),
                right: boxed(right),
            },
            Operation::Pow { measure, power } => SerialisedOperation::Pow {
                measure: boxed(measure),
                power: *power,
            },
            Operation::Reciprocal { measure } => SerialisedOperation::Reciprocal {
                measure: boxed(measure),
            },
            Operation::Superposition { base, manipulated } => SerialisedOperation::Superposition {
                base: boxed(base),
                manipulated: boxed(manipulated),
            },
        };

        SerialisedMeasure {
            coefficient: self.coefficient().clone(),
            constant: self.constant().clone(),
            unit: self.unit_system().named_exponents(self.unit()),
            unit_system: self.unit_system().dimensions().to_vec(),
            name_singular: ids.name_singular.clone(),
            name_plural: ids.name_plural.clone(),
            symbol: ids.symbol.clone(),
            allowed_prefixes: self.allowed_prefixes().flags().map(str::to_string).collect(),
            operation,
        }
    }

    /// Rebuild a measure from a blob.
    ///
    /// Nodes that describe the same unit system share one `UnitSystem`.
    /// Fails with `MalformedTree` if a prefix wraps anything other than a
    /// leaf or a power.
    pub fn deserialise(blob: &SerialisedMeasure<N>) -> Result<Self> {
        Self::deserialise_within(blob, None)
    }

    fn deserialise_within(
        blob: &SerialisedMeasure<N>,
        parent_system: Option<&Arc<UnitSystem>>,
    ) -> Result<Self> {
        let unit_system = match parent_system {
            Some(system) if system.dimensions() == blob.unit_system.as_slice() => Arc::clone(system),
            _ => Arc::new(UnitSystem::from_dimensions(blob.unit_system.clone())),
        };
        let child = |m: &SerialisedMeasure<N>| Self::deserialise_within(m, Some(&unit_system));

        let operation = match &blob.operation {
            SerialisedOperation::Leaf => Operation::Leaf,
            SerialisedOperation::Prefix {
                measure,
                multiplier,
                name,
                symbol,
            } => {
                let measure = child(measure)?;
                if !matches!(measure.operation(), Operation::Leaf | Operation::Pow { .. }) {
                    return Err(MeasureError::MalformedTree(format!(
                        "prefix '{}' cannot wrap a {} node",
                        name,
                        measure.operation().kind()
                    )));
                }
                Operation::Prefix {
                    measure,
                    multiplier: multiplier.clone(),
                    name: name.clone(),
                    symbol: symbol.clone(),
                }
            }
            SerialisedOperation::Times { left, right } => Operation::Times {
                left: child(left)?,
                right: child(right)?,
            },
            SerialisedOperation::Over { left, right } => Operation::Over {
                left: child(left)?,
                right: child(right)?,
            },
            SerialisedOperation::Pow { measure, power } => Operation::Pow {
                measure: child(measure)?,
                power: *power,
            },
            SerialisedOperation::Reciprocal { measure } => Operation::Reciprocal {
                measure: child(measure)?,
            },
            SerialisedOperation::Superposition { base, manipulated } => Operation::Superposition {
                base: child(base)?,
                manipulated: child(manipulated)?,
            },
        };

        let unit = unit_system.vector_from_named(&blob.unit)?;

        Ok(Self::from_parts(
            blob.coefficient.clone(),
            blob.constant.clone(),
            unit,
            unit_system,
            Identifiers::new(&blob.name_singular, &blob.name_plural, &blob.symbol),
            PrefixMask::new(&blob.allowed_prefixes),
            operation,
        ))
    }
}

impl<N: Numeric + Serialize> Measure<N> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.serialise())?)
    }
}

impl<N: Numeric + DeserializeOwned> Measure<N> {
    pub fn from_json(json: &str) -> Result<Self> {
        let blob: SerialisedMeasure<N> = serde_json::from_str(json)?;
        Self::deserialise(&blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::StringFormatter;
    use crate::Prefix;
    use pretty_assertions::assert_eq;

    fn meters_and_seconds() -> (Measure, Measure) {
        let si = UnitSystem::new([("length", "m"), ("time", "s")]);
        let mask = PrefixMask::new(["PREFIX_SI"]);
        (
            Measure::dimension(&si, "length", ("meter", "meters", "m"), mask.clone()).unwrap(),
            Measure::dimension(&si, "time", ("second", "seconds", "s"), mask).unwrap(),
        )
    }

    #[test]
    fn test_blob_shape() {
        let (meters, seconds) = meters_and_seconds();
        let json = meters.per(&seconds).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["operation"]["type"], "over");
        assert_eq!(value["operation"]["left"]["operation"]["type"], "leaf");
        assert_eq!(value["operation"]["left"]["nameSingular"], "meter");
        assert_eq!(value["unit"]["time"], -1);
        assert_eq!(value["unitSystem"][0]["symbol"], "m");
        assert_eq!(value["allowedPrefixes"], serde_json::json!([]));
    }

    #[test]
    fn test_children_share_unit_system() {
        let (meters, seconds) = meters_and_seconds();
        let restored = Measure::deserialise(&meters.times(&seconds).serialise()).unwrap();

        match restored.operation() {
            Operation::Times { left, right } => {
                assert!(Arc::ptr_eq(left.unit_system(), restored.unit_system()));
                assert!(Arc::ptr_eq(right.unit_system(), restored.unit_system()));
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_round_trip_preserves_prefix_mask() {
        let (meters, _) = meters_and_seconds();
        let restored: Measure = Measure::from_json(&meters.to_json().unwrap()).unwrap();

        assert_eq!(restored.allowed_prefixes(), meters.allowed_prefixes());
        let kilo = Prefix::new("kilo", "k", 1e3, PrefixMask::new(["PREFIX_SI"]));
        assert_eq!(kilo.apply(&restored).unwrap().format(true, &StringFormatter::symbols()), "km");
    }

    #[test]
    fn test_malformed_prefix_rejected() {
        let (meters, seconds) = meters_and_seconds();
        let mut blob = meters.serialise();
        blob.operation = SerialisedOperation::Prefix {
            measure: Box::new(meters.times(&seconds).serialise()),
            multiplier: 1e3,
            name: "kilo".to_string(),
            symbol: "k".to_string(),
        };

        assert!(matches!(
            Measure::deserialise(&blob),
            Err(MeasureError::MalformedTree(_))
        ));
    }

    #[test]
    fn test_unknown_dimension_rejected() {
        let (meters, _) = meters_and_seconds();
        let mut blob = meters.serialise();
        blob.unit.insert("luminosity".to_string(), 1);

        assert!(matches!(
            Measure::deserialise(&blob),
            Err(MeasureError::UnknownDimension(_))
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Measure::<f64>::from_json("{\"coefficient\": 1}"),
            Err(MeasureError::Serialisation(_))
        ));
    }
}
