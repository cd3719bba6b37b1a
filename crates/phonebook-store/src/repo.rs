//! Storage capability used by the contact service.
//!
//! Every call on [`ContactStore`] is atomic on its own. Multi-step sequences
//! (look up, check uniqueness, then save) go through one [`ContactTx`] obtained
//! from [`ContactStore::transaction`], which holds the store's lock until it is
//! dropped.

use phonebook_core::domain::{Contact, ContactId};

pub trait ContactTx {
    /// Assigns the next id when `contact.id` is unassigned, then inserts or
    /// overwrites the record keyed by id.
    fn save(&mut self, contact: Contact) -> Contact;

    fn get_by_id(&self, id: ContactId) -> Option<Contact>;

    /// Snapshot of every stored record in unspecified order.
    fn get_all(&self) -> Vec<Contact>;

    fn remove(&mut self, id: ContactId) -> bool;

    /// True when a record other than `exclude_id` already holds `phone_number`.
    fn is_phone_number_taken(&self, phone_number: &str, exclude_id: Option<ContactId>) -> bool;
}

pub trait ContactStore: Send + Sync {
    type Tx<'a>: ContactTx
    where
        Self: 'a;

    fn transaction(&self) -> Self::Tx<'_>;

    fn save(&self, contact: Contact) -> Contact {
        self.transaction().save(contact)
    }

    fn get_by_id(&self, id: ContactId) -> Option<Contact> {
        self.transaction().get_by_id(id)
    }

    fn get_all(&self) -> Vec<Contact> {
        self.transaction().get_all()
    }

    fn remove(&self, id: ContactId) -> bool {
        self.transaction().remove(id)
    }

    fn is_phone_number_taken(&self, phone_number: &str, exclude_id: Option<ContactId>) -> bool {
        self.transaction().is_phone_number_taken(phone_number, exclude_id)
    }
}
