//! Payee service: sequences validation, normalization and storage calls

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{PayeeError, PayeeResult};
use super::payee::{KeyType, Payee, PayeeId, PayeeInput, PayeeStatus, SearchField};
use super::query::{PagedPayees, page_offset};
use super::store::PayeeStore;
use super::validation::{
    canonical_key, is_any_valid_key, normalize, validate_email_change, validate_for_create,
    validate_for_edit,
};

/// Business rules that vary between deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Reject writes whose Pix key is already held by another payee
    #[serde(default = "default_unique_keys")]
    pub unique_keys: bool,
}

fn default_unique_keys() -> bool {
    true
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            unique_keys: default_unique_keys(),
        }
    }
}

/// Entry point for every payee operation
///
/// Holds no mutable state of its own; all state lives in the store.
#[derive(Clone)]
pub struct PayeeService {
    store: Arc<dyn PayeeStore>,
    policy: PolicyConfig,
}

impl PayeeService {
    pub fn new(store: Arc<dyn PayeeStore>, policy: PolicyConfig) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Validate, normalize and persist a new payee in status `Rascunho`
    pub async fn create(&self, input: PayeeInput) -> PayeeResult<Payee> {
        let validated = validate_for_create(input).inspect_err(|e| log_failure("create", e))?;

        let mut payee = normalize(validated);
        payee.id = 0;
        payee.status = PayeeStatus::Rascunho;

        self.ensure_key_available(&payee.key, None)
            .await
            .inspect_err(|e| log_failure("create", e))?;

        let created = self
            .store
            .create(payee)
            .await
            .inspect_err(|e| log_failure("create", e))?;

        tracing::info!(id = created.id, key_type = %created.key_type, "payee created");
        Ok(created)
    }

    /// Replace every field of an existing payee
    ///
    /// The stored status is kept; a `Validado` payee is rejected with
    /// `EditNotAllowed` before any field rule runs.
    pub async fn edit(&self, input: PayeeInput) -> PayeeResult<Payee> {
        let current = self
            .fetch(input.id)
            .await
            .inspect_err(|e| log_failure("edit", e))?;

        let validated =
            validate_for_edit(&current, input).inspect_err(|e| log_failure("edit", e))?;

        let mut payee = normalize(validated);
        payee.id = current.id;
        payee.status = current.status;

        self.ensure_key_available(&payee.key, Some(payee.id))
            .await
            .inspect_err(|e| log_failure("edit", e))?;

        self.store
            .update(&payee)
            .await
            .inspect_err(|e| log_failure("edit", e))?;

        tracing::info!(id = payee.id, "payee updated");
        Ok(payee)
    }

    /// Change only the email, whatever the payee's status
    pub async fn edit_email(&self, id: PayeeId, email: &str) -> PayeeResult<()> {
        validate_email_change(email).inspect_err(|e| log_failure("edit_email", e))?;
        let email = email.to_lowercase();

        self.fetch(id)
            .await
            .inspect_err(|e| log_failure("edit_email", e))?;

        self.store
            .update_email(id, &email)
            .await
            .inspect_err(|e| log_failure("edit_email", e))?;

        tracing::info!(id, "payee email updated");
        Ok(())
    }

    pub async fn get_by_id(&self, id: PayeeId) -> PayeeResult<Payee> {
        self.fetch(id)
            .await
            .inspect_err(|e| log_failure("get_by_id", e))
    }

    pub async fn delete(&self, id: PayeeId) -> PayeeResult<()> {
        self.remove(id)
            .await
            .inspect_err(|e| log_failure("delete", e))?;

        tracing::info!(id, "payee deleted");
        Ok(())
    }

    /// Delete each id independently
    ///
    /// Nothing is rolled back. If any id fails, the result is `PartialDelete`
    /// with the ids that were removed and the ids that were not, both in
    /// request order.
    pub async fn delete_many(&self, ids: &[PayeeId]) -> PayeeResult<()> {
        let mut succeeded = Vec::with_capacity(ids.len());
        let mut failed = Vec::new();

        for &id in ids {
            match self.remove(id).await {
                Ok(()) => succeeded.push(id),
                Err(e) => {
                    tracing::warn!(id, error = %e, "bulk delete skipped payee");
                    failed.push(id);
                }
            }
        }

        tracing::info!(
            deleted = succeeded.len(),
            failed = failed.len(),
            "bulk delete finished"
        );

        if failed.is_empty() {
            Ok(())
        } else {
            Err(PayeeError::PartialDelete { succeeded, failed })
        }
    }

    /// Name search; names are stored lower-cased so the query is too
    pub async fn search_by_name(&self, name: &str, page: usize) -> PayeeResult<PagedPayees> {
        self.search(SearchField::Name, &name.to_lowercase(), page)
            .await
    }

    pub async fn search_by_status(&self, status: &str, page: usize) -> PayeeResult<PagedPayees> {
        let status: PayeeStatus = status
            .parse()
            .inspect_err(|e| log_failure("search_by_status", e))?;
        self.search(SearchField::Status, status.as_str(), page)
            .await
    }

    pub async fn search_by_key(&self, key: &str, page: usize) -> PayeeResult<PagedPayees> {
        if !is_any_valid_key(key) {
            let err = PayeeError::KeyInvalid;
            log_failure("search_by_key", &err);
            return Err(err);
        }
        self.search(SearchField::Key, &canonical_key(key), page)
            .await
    }

    pub async fn search_by_key_type(
        &self,
        key_type: &str,
        page: usize,
    ) -> PayeeResult<PagedPayees> {
        let key_type: KeyType = key_type
            .parse()
            .inspect_err(|e| log_failure("search_by_key_type", e))?;
        self.search(SearchField::KeyType, key_type.as_str(), page)
            .await
    }

    /// Count then fetch one page of payees whose `field` equals `value`
    pub async fn search(
        &self,
        field: SearchField,
        value: &str,
        page: usize,
    ) -> PayeeResult<PagedPayees> {
        let page = page.max(1);

        let total = self
            .store
            .count_by_field(value, field)
            .await
            .inspect_err(|e| log_failure("search", e))?;
        let items = self
            .store
            .list_by_field(value, field, page_offset(page))
            .await
            .inspect_err(|e| log_failure("search", e))?;

        tracing::debug!(%field, total, page, "payee search");
        Ok(PagedPayees::new(total, page, items))
    }

    async fn fetch(&self, id: PayeeId) -> PayeeResult<Payee> {
        self.store
            .get(id)
            .await?
            .ok_or(PayeeError::NotFound { id })
    }

    async fn remove(&self, id: PayeeId) -> PayeeResult<()> {
        self.fetch(id).await?;
        self.store.delete(id).await
    }

    /// Fail with `KeyAlreadyRegistered` when another payee holds `key`
    async fn ensure_key_available(&self, key: &str, own_id: Option<PayeeId>) -> PayeeResult<()> {
        if !self.policy.unique_keys {
            return Ok(());
        }

        let holders = self.store.list_by_field(key, SearchField::Key, 0).await?;
        if holders.iter().any(|p| Some(p.id) != own_id) {
            return Err(PayeeError::KeyAlreadyRegistered);
        }
        Ok(())
    }
}

fn log_failure(operation: &'static str, err: &PayeeError) {
    match err {
        PayeeError::Storage(e) => tracing::error!(operation, error = %e, "storage failure"),
        PayeeError::NotFound { id } => tracing::warn!(operation, id, "payee not found"),
        other => tracing::warn!(operation, code = other.error_code(), "payee rejected"),
    }
}
