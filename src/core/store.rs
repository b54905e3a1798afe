//! Storage collaborator contract for payees

use async_trait::async_trait;

use super::error::PayeeResult;
use super::payee::{Payee, PayeeId, SearchField};

/// Persistence for payee records
///
/// Implementations own id assignment and map [`SearchField`] to their own
/// column names. Failures other than `NotFound` are reported as
/// [`PayeeError::Storage`](super::error::PayeeError::Storage).
#[async_trait]
pub trait PayeeStore: Send + Sync {
    /// Insert a new payee, returning it with its assigned id
    async fn create(&self, payee: Payee) -> PayeeResult<Payee>;

    /// Get a payee by id
    async fn get(&self, id: PayeeId) -> PayeeResult<Option<Payee>>;

    /// Replace every field of an existing payee except its id
    ///
    /// Fails with `NotFound` if the id is unknown.
    async fn update(&self, payee: &Payee) -> PayeeResult<()>;

    /// Change only the email of an existing payee
    async fn update_email(&self, id: PayeeId, email: &str) -> PayeeResult<()>;

    /// Delete a payee; fails with `NotFound` if the id is unknown
    async fn delete(&self, id: PayeeId) -> PayeeResult<()>;

    /// Delete every listed payee that exists, returning how many were removed
    async fn delete_many(&self, ids: &[PayeeId]) -> PayeeResult<u64>;

    /// Count payees whose `field` equals `value`
    async fn count_by_field(&self, value: &str, field: SearchField) -> PayeeResult<usize>;

    /// One page (up to `PAGE_SIZE`) of payees whose `field` equals `value`,
    /// ordered by id, starting at `offset`
    async fn list_by_field(
        &self,
        value: &str,
        field: SearchField,
        offset: usize,
    ) -> PayeeResult<Vec<Payee>>;
}
