pub mod contact;
pub mod ids;
pub mod phone;

pub use contact::{Contact, ContactFields, ContactPayload};
pub use ids::ContactId;
pub use phone::is_valid_phone_number;
