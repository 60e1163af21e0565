/// A string that does not name any member of a closed enum.
///
/// Raised at every parsing boundary (status, source, relationship, task
/// bucket, milestone status) instead of coercing to a fallback value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Human-readable enum name, e.g. `"status"` or `"source"`.
    pub kind: &'static str,
    /// The rejected input, verbatim.
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        ParseEnumError {
            kind,
            value: value.into(),
        }
    }
}

/// Errors raised when a model value violates one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    InvalidEnum(#[from] ParseEnumError),

    /// `conversion_probability` outside 0..=100.
    #[error("conversion probability {0} is outside 0..=100")]
    ProbabilityOutOfRange(u16),

    /// `updated_at` earlier than `created_at`.
    #[error("contact {id}: updated_at precedes created_at")]
    TimestampOrder { id: String },

    /// A required text field is blank.
    #[error("contact {id}: missing required field {field}")]
    MissingField { id: String, field: &'static str },
}
