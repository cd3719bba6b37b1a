use phonebook_core::domain::ContactId;
use phonebook_core::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] CoreError),
    #[error("Contact not found")]
    NotFound(ContactId),
    #[error("Phone number already exists")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Validation,
    NotFound,
    Conflict,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Validation(_) => ServiceErrorKind::Validation,
            ServiceError::NotFound(_) => ServiceErrorKind::NotFound,
            ServiceError::Conflict(_) => ServiceErrorKind::Conflict,
        }
    }
}
