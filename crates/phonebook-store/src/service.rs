//! Contact use-cases layered over a [`ContactStore`].
//!
//! Validation, phone-number uniqueness and identity assignment are enforced
//! here. Create and update run their lookup, uniqueness check and save inside
//! one store transaction, so two callers racing on the same phone number
//! cannot both succeed.

use crate::error::{Result, ServiceError};
use crate::repo::{ContactStore, ContactTx};
use phonebook_core::domain::{Contact, ContactId, ContactPayload};
use tracing::debug;

pub struct ContactService<S> {
    store: S,
}

impl<S: ContactStore> ContactService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&self, payload: &ContactPayload) -> Result<Contact> {
        let fields = payload.validate()?;

        let mut tx = self.store.transaction();
        if tx.is_phone_number_taken(&fields.phone_number, None) {
            return Err(ServiceError::Conflict(fields.phone_number));
        }
        let contact = tx.save(Contact::draft(fields));
        debug!(id = %contact.id, "contact created");
        Ok(contact)
    }

    /// Replaces name, phone number and address of an existing contact.
    ///
    /// A contact may keep its own phone number. Submitting fields identical to
    /// the stored ones returns the stored record without writing.
    pub fn update(&self, id: ContactId, payload: &ContactPayload) -> Result<Contact> {
        let mut tx = self.store.transaction();
        let existing = tx.get_by_id(id).ok_or(ServiceError::NotFound(id))?;

        let fields = payload.validate()?;
        if tx.is_phone_number_taken(&fields.phone_number, Some(id)) {
            return Err(ServiceError::Conflict(fields.phone_number));
        }

        if existing.has_fields(&fields) {
            debug!(id = %id, "contact unchanged, skipping write");
            return Ok(existing);
        }

        let contact = tx.save(Contact::with_fields(id, fields));
        debug!(id = %id, "contact updated");
        Ok(contact)
    }

    pub fn get_by_id(&self, id: ContactId) -> Result<Contact> {
        self.store.get_by_id(id).ok_or(ServiceError::NotFound(id))
    }

    pub fn get_all(&self) -> Vec<Contact> {
        self.store.get_all()
    }

    pub fn delete(&self, id: ContactId) -> Result<()> {
        if !self.store.remove(id) {
            return Err(ServiceError::NotFound(id));
        }
        debug!(id = %id, "contact deleted");
        Ok(())
    }
}
