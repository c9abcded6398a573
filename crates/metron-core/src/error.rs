//! Error types for measure construction, arithmetic and formatting

use thiserror::Error;

/// Errors raised by measure operations.
///
/// The autocompleter never surfaces these: a query that cannot be parsed
/// simply produces no completions.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Two measures with different dimension vectors were combined
    #[error("Dimension mismatch: cannot combine {left} with {right}")]
    DimensionMismatch { left: String, right: String },

    /// A prefix category is not in the measure's allowed set
    #[error("Prefix '{prefix}' ({flag}) is not allowed for measure {measure}")]
    PrefixNotPermitted {
        prefix: String,
        flag: String,
        measure: String,
    },

    /// A prefix node wraps something other than a leaf or a power
    #[error("Malformed measure tree: {0}")]
    MalformedTree(String),

    /// The unit system has no dimension with this name
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// The value display option is not recognised or is missing its parameter
    #[error("Unsupported value display: {0}")]
    UnsupportedValueDisplay(String),

    /// A dynamic or multi-unit formatter was created without candidates
    #[error("At least one candidate measure is required")]
    EmptyCandidates,

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeasureError>;
