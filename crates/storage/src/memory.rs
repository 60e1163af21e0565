use prospector_core::Contact;

use crate::error::StorageError;
use crate::traits::ContactStore;

/// Vec-backed store for a single session.
///
/// Lookups are linear; a consultant's list tops out in the low hundreds.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactStore {
    contacts: Vec<Contact>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed records, rejecting duplicate ids.
    pub fn from_contacts(contacts: Vec<Contact>) -> Result<Self, StorageError> {
        let mut store = Self::new();
        for contact in contacts {
            store.insert(contact)?;
        }
        Ok(store)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }
}

impl ContactStore for MemoryContactStore {
    fn insert(&mut self, contact: Contact) -> Result<(), StorageError> {
        if self.position(&contact.id).is_some() {
            return Err(StorageError::DuplicateId { id: contact.id });
        }
        tracing::trace!(id = %contact.id, "contact inserted");
        self.contacts.push(contact);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<&Contact, StorageError> {
        self.contacts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::ContactNotFound { id: id.to_string() })
    }

    fn replace(&mut self, contact: Contact) -> Result<Contact, StorageError> {
        let idx = self
            .position(&contact.id)
            .ok_or_else(|| StorageError::ContactNotFound {
                id: contact.id.clone(),
            })?;
        Ok(std::mem::replace(&mut self.contacts[idx], contact))
    }

    fn remove(&mut self, id: &str) -> Result<Contact, StorageError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StorageError::ContactNotFound { id: id.to_string() })?;
        tracing::trace!(id, "contact removed");
        Ok(self.contacts.remove(idx))
    }

    fn list(&self) -> Vec<&Contact> {
        self.contacts.iter().collect()
    }

    fn find_by_email(&self, email: &str) -> Option<&Contact> {
        let wanted = email.trim().to_lowercase();
        self.contacts
            .iter()
            .find(|c| c.email.trim().to_lowercase() == wanted)
    }

    fn len(&self) -> usize {
        self.contacts.len()
    }
}
