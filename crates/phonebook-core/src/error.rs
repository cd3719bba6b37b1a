use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name is too long (max {max})")]
    NameTooLong { max: usize, len: usize },
    #[error("Address is required")]
    AddressRequired,
    #[error("Phone number is required")]
    PhoneNumberRequired,
    #[error("Invalid phone format. Required: +375XXXXXXXXX (Codes: 29, 25, 44, 33, 17)")]
    InvalidPhoneNumber(String),
}

impl CoreError {
    /// Payload field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            CoreError::NameRequired | CoreError::NameTooLong { .. } => "name",
            CoreError::AddressRequired => "address",
            CoreError::PhoneNumberRequired | CoreError::InvalidPhoneNumber(_) => "phone_number",
        }
    }
}
