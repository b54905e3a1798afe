//! Literal format checks for Pix keys and email addresses

use regex::Regex;
use std::sync::LazyLock;

use super::checksum::{validate_cnpj, validate_cpf};
use crate::core::payee::KeyType;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9+_.-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?55)?[1-9][0-9]9[0-9]{8}$").expect("phone regex is valid")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("UUID regex is valid")
});

/// Check that an email address is syntactically valid
///
/// e.g. `user@example.com` or `flavio.rodolfo+transfeera@example.co.uk`
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a Brazilian mobile number, with or without the `+55` country code
///
/// Area code first digit is 1-9; the subscriber number is nine digits
/// starting with 9.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Check a random key: a lowercase, hyphenated UUID
pub fn validate_random_key(key: &str) -> bool {
    UUID_REGEX.is_match(key)
}

/// Check that `key` has the shape required by `key_type`
pub fn validate_key_of_type(key: &str, key_type: KeyType) -> bool {
    match key_type {
        KeyType::Cpf => validate_cpf(key),
        KeyType::Cnpj => validate_cnpj(key),
        KeyType::Telefone => validate_phone(key),
        KeyType::Email => validate_email(key),
        KeyType::ChaveAleatoria => validate_random_key(key),
    }
}

/// Check a raw key type name against the recognized set
pub fn is_valid_key_type(key_type: &str) -> bool {
    key_type.parse::<KeyType>().is_ok()
}

/// True when the key looks like any kind of Pix key
pub fn is_any_valid_key(key: &str) -> bool {
    KeyType::ALL
        .into_iter()
        .any(|kt| validate_key_of_type(key, kt))
}
