use prospector_core::{ModelError, ParseEnumError};
use prospector_storage::StorageError;

/// Errors raised by pipeline mutations.
///
/// Projections and aggregations never fail; every variant here comes from
/// a mutation boundary and leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// A contact, task, milestone or step id that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A value outside a closed enum, or a status that cannot be set.
    #[error(transparent)]
    InvalidEnum(#[from] ParseEnumError),

    /// Seed or import data that breaks a record invariant.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Day submission attempted with unfinished tasks.
    #[error(
        "please complete the remaining {remaining} task{} before submitting",
        plural(.remaining)
    )]
    IncompleteSubmission { remaining: usize },
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

impl PipelineError {
    pub(crate) fn contact_not_found(id: &str) -> Self {
        PipelineError::NotFound {
            kind: "contact",
            id: id.to_string(),
        }
    }
}

impl From<StorageError> for PipelineError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::ContactNotFound { id } => PipelineError::NotFound {
                kind: "contact",
                id,
            },
            StorageError::DuplicateId { .. } => PipelineError::Validation(e.to_string()),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidEnum(inner) => PipelineError::InvalidEnum(inner),
            other => PipelineError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_submission_pluralizes() {
        assert_eq!(
            PipelineError::IncompleteSubmission { remaining: 1 }.to_string(),
            "please complete the remaining 1 task before submitting"
        );
        assert_eq!(
            PipelineError::IncompleteSubmission { remaining: 3 }.to_string(),
            "please complete the remaining 3 tasks before submitting"
        );
    }

    #[test]
    fn storage_not_found_maps_to_not_found() {
        let e: PipelineError = StorageError::ContactNotFound { id: "c-1".into() }.into();
        assert_eq!(e.to_string(), "contact not found: c-1");
    }
}
