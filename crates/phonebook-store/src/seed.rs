use phonebook_core::domain::{Contact, ContactFields};

#[derive(Debug, Clone, Copy)]
pub struct SampleContact {
    pub name: &'static str,
    pub phone_number: &'static str,
    pub address: &'static str,
}

impl SampleContact {
    pub fn to_contact(&self) -> Contact {
        Contact::draft(ContactFields {
            name: self.name.to_string(),
            phone_number: self.phone_number.to_string(),
            address: self.address.to_string(),
        })
    }
}

pub const SAMPLE_CONTACTS: [SampleContact; 3] = [
    SampleContact {
        name: "Nikita",
        phone_number: "+375291112233",
        address: "Minsk, Belarus",
    },
    SampleContact {
        name: "Artur",
        phone_number: "+375447778899",
        address: "Gomel, Belarus",
    },
    SampleContact {
        name: "Kristina",
        phone_number: "+375251234567",
        address: "Mogilev, Belarus",
    },
];
