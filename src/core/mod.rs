//! Core domain: payee types, validation rules and the payee service

pub mod error;
pub mod payee;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ErrorResponse, PayeeError, PayeeResult, StorageError};
pub use payee::{KeyType, Payee, PayeeId, PayeeInput, PayeeStatus, SearchField};
pub use query::{PAGE_SIZE, PageParams, PagedPayees};
pub use service::{PayeeService, PolicyConfig};
pub use store::PayeeStore;
