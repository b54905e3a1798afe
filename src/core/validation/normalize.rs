//! Canonical formatting applied to payees that already passed validation

use super::checksum::{validate_cnpj, validate_cpf};
use super::formats::validate_phone;
use super::policy::ValidatedPayee;
use crate::core::payee::{KeyType, Payee, PayeeStatus};

/// Strip everything except ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format eleven digits as `###.###.###-##`; other lengths pass through
pub fn format_cpf(digits: &str) -> String {
    if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    )
}

/// Format fourteen digits as `##.###.###/####-##`; other lengths pass through
pub fn format_cnpj(digits: &str) -> String {
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..]
    )
}

/// Re-punctuate a tax id by its digit count: more than 11 digits is a CNPJ
pub fn format_tax_id(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() > 11 {
        format_cnpj(&digits)
    } else {
        format_cpf(&digits)
    }
}

/// The stored form of a key used as a search value
///
/// CPF and CNPJ keys are stored punctuated, so bare digits are re-punctuated.
/// A value that is also a well-formed phone number is kept as typed, since
/// phone keys are stored verbatim.
pub fn canonical_key(key: &str) -> String {
    if validate_phone(key) {
        key.to_string()
    } else if validate_cpf(key) {
        format_cpf(&digits_only(key))
    } else if validate_cnpj(key) {
        format_cnpj(&digits_only(key))
    } else {
        key.to_string()
    }
}

/// Bring a validated payee into its stored form
///
/// Tax ids and CPF/CNPJ keys get canonical punctuation, free text is
/// lower-cased. The status is left at its default (`Rascunho`); callers that
/// keep an existing status set it afterwards.
pub fn normalize(validated: ValidatedPayee) -> Payee {
    let ValidatedPayee { input, key_type } = validated;

    let key = match key_type {
        KeyType::Cpf => format_cpf(&digits_only(&input.key)),
        KeyType::Cnpj => format_cnpj(&digits_only(&input.key)),
        _ => input.key,
    };

    Payee {
        id: input.id,
        tax_id: format_tax_id(&input.tax_id),
        name: input.name.to_lowercase(),
        key_type,
        key,
        status: PayeeStatus::default(),
        email: input.email.to_lowercase(),
    }
}
