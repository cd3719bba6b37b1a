use crate::domain::contact::{ContactFields, ContactPayload};
use crate::domain::phone::is_valid_phone_number;
use crate::error::CoreError;

pub const MAX_NAME_LEN: usize = 50;

/// Checks run in a fixed order and stop at the first violation.
pub fn validate_payload(payload: &ContactPayload) -> Result<ContactFields, CoreError> {
    let name = required(payload.name.as_deref(), CoreError::NameRequired)?;
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::NameTooLong {
            max: MAX_NAME_LEN,
            len,
        });
    }

    let address = required(payload.address.as_deref(), CoreError::AddressRequired)?;

    let phone_number = required(
        payload.phone_number.as_deref(),
        CoreError::PhoneNumberRequired,
    )?;
    if !is_valid_phone_number(phone_number) {
        return Err(CoreError::InvalidPhoneNumber(phone_number.to_string()));
    }

    Ok(ContactFields {
        name: name.to_string(),
        phone_number: phone_number.to_string(),
        address: address.to_string(),
    })
}

fn required(value: Option<&str>, missing: CoreError) -> Result<&str, CoreError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing),
    }
}
