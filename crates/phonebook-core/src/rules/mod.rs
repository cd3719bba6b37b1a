pub mod validation;

pub use validation::{validate_payload, MAX_NAME_LEN};
