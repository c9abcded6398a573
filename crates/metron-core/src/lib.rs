//! metron-core: Units of measure with dimension checking
//!
//! Measures are built from a [`UnitSystem`] and composed with ordinary
//! arithmetic. Every composed measure remembers how it was built, so it can
//! be formatted as `km/h` or "kilometers per hour", converted to any
//! compatible measure (affine units such as Celsius included), serialised,
//! and found again from free text by the [`AutoCompleter`].
//!
//! # Example
//!
//! ```
//! use metron_core::{Measure, Prefix, PrefixMask, StringFormatter, UnitSystem};
//!
//! let si = UnitSystem::new([("length", "m"), ("time", "s")]);
//! let meters: Measure = Measure::dimension(&si, "length", ("meter", "meters", "m"), PrefixMask::new(["SI"])).unwrap();
//! let seconds = Measure::dimension(&si, "time", ("second", "seconds", "s"), PrefixMask::new(["SI"])).unwrap();
//! let hours = Measure::of(3600.0, &seconds, ("hour", "hours", "hr"), PrefixMask::none());
//! let kilo = Prefix::new("kilo", "k", 1e3, PrefixMask::new(["SI"]));
//!
//! // Composition keeps the tree
//! let kph = kilo.apply(&meters).unwrap().per(&hours);
//! assert_eq!(kph.format(false, &StringFormatter::symbols()), "km/hr");
//! assert_eq!(kph.format(true, &StringFormatter::names()), "kilometers per hour");
//!
//! // Conversion between compatible measures
//! let mps = meters.per(&seconds);
//! let to_mps = kph.create_converter_to(&mps).unwrap();
//! assert!((to_mps.convert(&36.0) - 10.0).abs() < 1e-9);
//!
//! // Incompatible measures are rejected
//! assert!(meters.plus(&seconds).is_err());
//! ```

pub mod autocomplete;
pub mod error;
pub mod format;
pub mod measure;
pub mod numeric;
pub mod prefix;
pub mod serialise;
pub mod trie;
pub mod unit_system;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use autocomplete::{AutoCompleter, Completion, MeasureAlias, ScoringConfig};
pub use error::{MeasureError, Result};
pub use format::{
    DynamicFormatter, FormatOptions, FormattedValue, MeasureFormatter, MultiUnitFormatter,
    PowerStyle, StringFormatter, UnitText, ValueDisplay, ValueFormatOptions, ValueFormatter,
};
pub use measure::{Converter, Identifiers, Measure, Operation};
pub use numeric::Numeric;
pub use prefix::{Prefix, PrefixMask};
pub use serialise::{SerialisedMeasure, SerialisedOperation};
pub use trie::{MatchKind, Trie, TrieEntry, TrieHit};
pub use unit_system::{Dimension, DimensionVector, UnitSystem};
