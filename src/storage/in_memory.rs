//! In-memory implementation of PayeeStore for testing and development

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::query::PAGE_SIZE;
use crate::core::{
    Payee, PayeeError, PayeeId, PayeeResult, PayeeStore, SearchField, StorageError,
};

const BACKEND: &str = "in-memory";

#[derive(Debug)]
struct State {
    payees: BTreeMap<PayeeId, Payee>,
    next_id: PayeeId,
}

/// In-memory payee store
///
/// Ids come from a sequence starting at 1 and are never reused. Uses RwLock
/// for thread-safe access; clones share the same records.
#[derive(Clone, Debug)]
pub struct InMemoryPayeeStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryPayeeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                payees: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    fn read(&self) -> PayeeResult<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|e| {
            StorageError::Query {
                backend: BACKEND,
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> PayeeResult<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|e| {
            StorageError::Query {
                backend: BACKEND,
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

impl Default for InMemoryPayeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayeeStore for InMemoryPayeeStore {
    async fn create(&self, mut payee: Payee) -> PayeeResult<Payee> {
        let mut state = self.write()?;

        payee.id = state.next_id;
        state.next_id += 1;
        state.payees.insert(payee.id, payee.clone());

        Ok(payee)
    }

    async fn get(&self, id: PayeeId) -> PayeeResult<Option<Payee>> {
        let state = self.read()?;
        Ok(state.payees.get(&id).cloned())
    }

    async fn update(&self, payee: &Payee) -> PayeeResult<()> {
        let mut state = self.write()?;

        let stored = state
            .payees
            .get_mut(&payee.id)
            .ok_or(PayeeError::NotFound { id: payee.id })?;
        *stored = payee.clone();

        Ok(())
    }

    async fn update_email(&self, id: PayeeId, email: &str) -> PayeeResult<()> {
        let mut state = self.write()?;

        let stored = state
            .payees
            .get_mut(&id)
            .ok_or(PayeeError::NotFound { id })?;
        stored.email = email.to_string();

        Ok(())
    }

    async fn delete(&self, id: PayeeId) -> PayeeResult<()> {
        let mut state = self.write()?;

        state
            .payees
            .remove(&id)
            .map(|_| ())
            .ok_or(PayeeError::NotFound { id })
    }

    async fn delete_many(&self, ids: &[PayeeId]) -> PayeeResult<u64> {
        let mut state = self.write()?;

        let removed = ids
            .iter()
            .filter(|&&id| state.payees.remove(&id).is_some())
            .count();

        Ok(removed as u64)
    }

    async fn count_by_field(&self, value: &str, field: SearchField) -> PayeeResult<usize> {
        let state = self.read()?;

        Ok(state
            .payees
            .values()
            .filter(|p| p.field_value(field) == value)
            .count())
    }

    async fn list_by_field(
        &self,
        value: &str,
        field: SearchField,
        offset: usize,
    ) -> PayeeResult<Vec<Payee>> {
        let state = self.read()?;

        Ok(state
            .payees
            .values()
            .filter(|p| p.field_value(field) == value)
            .skip(offset)
            .take(PAGE_SIZE)
            .cloned()
            .collect())
    }
}
