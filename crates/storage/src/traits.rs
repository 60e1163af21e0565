use prospector_core::Contact;

use crate::error::StorageError;

/// The storage trait for contact records.
///
/// A `ContactStore` owns every `Contact` of a session. Implementations must
/// keep insertion order: projections list contacts in the order the store
/// yields them, and that order is what the user sees.
///
/// ## Identity
///
/// Contact ids are unique within a store and never change. `replace` looks
/// the existing record up by the incoming record's id, so it cannot rename
/// a contact.
///
/// ## Email lookup
///
/// `find_by_email` compares case-insensitively after trimming, which is the
/// rule the import path uses for duplicate detection.
pub trait ContactStore {
    /// Append a new contact.
    ///
    /// Returns `Err(StorageError::DuplicateId)` if the id is taken.
    fn insert(&mut self, contact: Contact) -> Result<(), StorageError>;

    /// Read a contact by id.
    ///
    /// Returns `Err(StorageError::ContactNotFound)` if absent.
    fn get(&self, id: &str) -> Result<&Contact, StorageError>;

    /// Overwrite the stored record that has `contact.id`, returning the
    /// previous value.
    ///
    /// Returns `Err(StorageError::ContactNotFound)` if absent.
    fn replace(&mut self, contact: Contact) -> Result<Contact, StorageError>;

    /// Remove a contact by id, returning it.
    ///
    /// Returns `Err(StorageError::ContactNotFound)` if absent.
    fn remove(&mut self, id: &str) -> Result<Contact, StorageError>;

    /// All contacts in insertion order.
    fn list(&self) -> Vec<&Contact>;

    /// Find a contact whose email matches `email` (trimmed, case-insensitive).
    fn find_by_email(&self, email: &str) -> Option<&Contact>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    /// Remove every listed id that is present. Unknown ids are skipped.
    ///
    /// Returns the number of contacts removed.
    fn remove_many(&mut self, ids: &[String]) -> usize {
        ids.iter().filter(|id| self.remove(id.as_str()).is_ok()).count()
    }
}
