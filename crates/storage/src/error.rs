/// All errors that can be returned by a ContactStore implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No contact with the given id.
    #[error("contact not found: {id}")]
    ContactNotFound { id: String },

    /// A contact with this id is already stored.
    #[error("contact already exists: {id}")]
    DuplicateId { id: String },
}
