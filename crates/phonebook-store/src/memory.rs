use crate::repo::{ContactStore, ContactTx};
use crate::seed::SAMPLE_CONTACTS;
use phonebook_core::domain::{Contact, ContactId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Table {
    contacts: HashMap<ContactId, Contact>,
    last_id: i64,
}

impl Table {
    /// Next free id, skipping ids already taken by explicit-id saves.
    ///
    /// Only assignment moves `last_id`, and every step passes either a stored
    /// record or the id being assigned, so it cannot overflow.
    fn next_id(&mut self) -> ContactId {
        loop {
            self.last_id += 1;
            let id = ContactId(self.last_id);
            if !self.contacts.contains_key(&id) {
                return id;
            }
        }
    }
}

/// In-process contact store: one map and one id counter behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the sample contacts (ids 1..=3).
    pub fn with_samples() -> Self {
        let store = Self::new();
        {
            let mut tx = store.transaction();
            for sample in SAMPLE_CONTACTS {
                tx.save(sample.to_contact());
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.lock().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // Table mutations never panic, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ContactStore for MemoryStore {
    type Tx<'a> = MemoryTx<'a>;

    fn transaction(&self) -> MemoryTx<'_> {
        MemoryTx { table: self.lock() }
    }
}

pub struct MemoryTx<'a> {
    table: MutexGuard<'a, Table>,
}

impl ContactTx for MemoryTx<'_> {
    fn save(&mut self, mut contact: Contact) -> Contact {
        if !contact.id.is_assigned() {
            contact.id = self.table.next_id();
        }
        self.table.contacts.insert(contact.id, contact.clone());
        contact
    }

    fn get_by_id(&self, id: ContactId) -> Option<Contact> {
        self.table.contacts.get(&id).cloned()
    }

    fn get_all(&self) -> Vec<Contact> {
        self.table.contacts.values().cloned().collect()
    }

    fn remove(&mut self, id: ContactId) -> bool {
        self.table.contacts.remove(&id).is_some()
    }

    fn is_phone_number_taken(&self, phone_number: &str, exclude_id: Option<ContactId>) -> bool {
        self.table
            .contacts
            .values()
            .any(|contact| contact.phone_number == phone_number && Some(contact.id) != exclude_id)
    }
}
