//! Business rules that gate every payee write
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. name longer than 2 characters
//! 2. email, when present, well formed
//! 3. tax id: CNPJ rules above 11 digits, CPF rules otherwise
//! 4. key type is a recognized name
//! 5. key looks like some kind of Pix key
//! 6. key matches the declared key type
//!
//! A successful check yields a [`ValidatedPayee`], the only input the
//! normalizer accepts.

use super::checksum::{validate_cnpj, validate_cpf};
use super::formats::{is_any_valid_key, is_valid_key_type, validate_email, validate_key_of_type};
use super::normalize::digits_only;
use crate::core::error::{PayeeError, PayeeResult};
use crate::core::payee::{KeyType, Payee, PayeeInput};

/// Minimum name length, exclusive
const NAME_MIN_EXCLUSIVE: usize = 2;

/// A payee input that passed every rule, with its key type resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayee {
    pub(crate) input: PayeeInput,
    pub(crate) key_type: KeyType,
}

impl ValidatedPayee {
    pub fn input(&self) -> &PayeeInput {
        &self.input
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

/// Validate a payee about to be created
pub fn validate_for_create(input: PayeeInput) -> PayeeResult<ValidatedPayee> {
    validate_fields(&input)?;
    let key_type = input.key_type.parse()?;

    if !is_any_valid_key(&input.key) {
        return Err(PayeeError::KeyInvalid);
    }
    if !validate_key_of_type(&input.key, key_type) {
        return Err(PayeeError::KeyTypeMismatch);
    }

    Ok(ValidatedPayee { input, key_type })
}

/// Validate a full edit of `current`
///
/// Validated payees reject full edits outright; otherwise the create rules
/// apply to the proposed values.
pub fn validate_for_edit(current: &Payee, input: PayeeInput) -> PayeeResult<ValidatedPayee> {
    if !current.status.allows_full_edit() {
        return Err(PayeeError::EditNotAllowed { id: current.id });
    }
    validate_for_create(input)
}

/// Validate the email-only edit, allowed in every status
pub fn validate_email_change(email: &str) -> PayeeResult<()> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(PayeeError::EmailInvalid)
    }
}

/// Validate a tax id, choosing CPF or CNPJ rules by digit count
pub fn validate_tax_id(tax_id: &str) -> PayeeResult<()> {
    if digits_only(tax_id).len() > 11 {
        if !validate_cnpj(tax_id) {
            return Err(PayeeError::CnpjInvalid);
        }
    } else if !validate_cpf(tax_id) {
        return Err(PayeeError::CpfInvalid);
    }
    Ok(())
}

fn validate_fields(input: &PayeeInput) -> PayeeResult<()> {
    if input.name.trim().chars().count() <= NAME_MIN_EXCLUSIVE {
        return Err(PayeeError::NameInvalid);
    }
    if !input.email.is_empty() && !validate_email(&input.email) {
        return Err(PayeeError::EmailInvalid);
    }
    validate_tax_id(&input.tax_id)?;
    if !is_valid_key_type(&input.key_type) {
        return Err(PayeeError::KeyTypeInvalid);
    }
    Ok(())
}
