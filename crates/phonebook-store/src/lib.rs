pub mod error;
pub mod memory;
pub mod repo;
pub mod seed;
pub mod service;

pub use error::{ServiceError, ServiceErrorKind};
pub use memory::MemoryStore;
pub use repo::{ContactStore, ContactTx};
pub use service::ContactService;
