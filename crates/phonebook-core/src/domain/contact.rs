use crate::domain::ids::ContactId;
use crate::error::CoreError;
use crate::rules::validation::validate_payload;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

impl Contact {
    /// A contact without identity; the store assigns one on first save.
    pub fn draft(fields: ContactFields) -> Self {
        Self::with_fields(ContactId::UNASSIGNED, fields)
    }

    pub fn with_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone_number: fields.phone_number,
            address: fields.address,
        }
    }

    pub fn has_fields(&self, fields: &ContactFields) -> bool {
        self.name == fields.name
            && self.phone_number == fields.phone_number
            && self.address == fields.address
    }
}

/// Candidate contact data as submitted by a caller. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl ContactPayload {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            phone_number: Some(phone_number.into()),
            address: Some(address.into()),
        }
    }

    pub fn validate(&self) -> Result<ContactFields, CoreError> {
        validate_payload(self)
    }
}

/// The mutable fields of a contact after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPayload};
    use crate::domain::ContactId;

    #[test]
    fn payload_reads_camel_case_and_tolerates_missing_fields() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"name":"Egor","phoneNumber":"+375293451267"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Egor"));
        assert_eq!(payload.phone_number.as_deref(), Some("+375293451267"));
        assert!(payload.address.is_none());
    }

    #[test]
    fn contact_serializes_phone_number_as_camel_case() {
        let contact = Contact {
            id: ContactId(7),
            name: "Egor".to_string(),
            phone_number: "+375293451267".to_string(),
            address: "Minsk".to_string(),
        };
        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["phoneNumber"], "+375293451267");
    }

    #[test]
    fn has_fields_compares_all_three_fields() {
        let fields = ContactPayload::new("Egor", "+375293451267", "Minsk")
            .validate()
            .unwrap();
        let contact = Contact::with_fields(ContactId(1), fields.clone());
        assert!(contact.has_fields(&fields));

        let mut moved = fields;
        moved.address = "Brest".to_string();
        assert!(!contact.has_fields(&moved));
    }
}
