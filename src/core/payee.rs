//! Payee (recebedor) records and the enums that describe them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PayeeError;

/// Server-assigned payee identifier; `0` until the record is persisted
pub type PayeeId = i64;

/// Kinds of Pix key a payee may register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    Cpf,
    Cnpj,
    Email,
    Telefone,
    ChaveAleatoria,
}

impl KeyType {
    pub const ALL: [KeyType; 5] = [
        KeyType::Cpf,
        KeyType::Cnpj,
        KeyType::Email,
        KeyType::Telefone,
        KeyType::ChaveAleatoria,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Cpf => "CPF",
            KeyType::Cnpj => "CNPJ",
            KeyType::Email => "EMAIL",
            KeyType::Telefone => "TELEFONE",
            KeyType::ChaveAleatoria => "CHAVE_ALEATORIA",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = PayeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .into_iter()
            .find(|kt| kt.as_str() == s)
            .ok_or(PayeeError::KeyTypeInvalid)
    }
}

/// Lifecycle state of a payee
///
/// Only `Rascunho` is ever assigned by this crate; the other transitions are
/// driven by downstream compliance checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayeeStatus {
    #[default]
    Rascunho,
    Validando,
    Validado,
}

impl PayeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayeeStatus::Rascunho => "Rascunho",
            PayeeStatus::Validando => "Validando",
            PayeeStatus::Validado => "Validado",
        }
    }

    /// Whether every field may still be edited
    pub fn allows_full_edit(&self) -> bool {
        !matches!(self, PayeeStatus::Validado)
    }
}

impl fmt::Display for PayeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayeeStatus {
    type Err = PayeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rascunho" => Ok(PayeeStatus::Rascunho),
            "Validando" => Ok(PayeeStatus::Validando),
            "Validado" => Ok(PayeeStatus::Validado),
            _ => Err(PayeeError::StatusInvalid),
        }
    }
}

/// A stored payee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub id: PayeeId,
    #[serde(rename = "cpf_cnpj")]
    pub tax_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_chave_pix")]
    pub key_type: KeyType,
    #[serde(rename = "chave_pix")]
    pub key: String,
    pub status: PayeeStatus,
    #[serde(default)]
    pub email: String,
}

impl Payee {
    /// Value of a searchable field, in the form storage compares against
    pub fn field_value(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::Key => &self.key,
            SearchField::KeyType => self.key_type.as_str(),
            SearchField::Status => self.status.as_str(),
        }
    }
}

/// A payee as submitted for create or edit, before any validation
///
/// `key_type` is raw text here; it only becomes a [`KeyType`] once the
/// validation policy accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeInput {
    #[serde(default)]
    pub id: PayeeId,
    #[serde(rename = "cpf_cnpj")]
    pub tax_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_chave_pix")]
    pub key_type: String,
    #[serde(rename = "chave_pix")]
    pub key: String,
    #[serde(default)]
    pub email: String,
}

/// Fields a payee search may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Key,
    KeyType,
    Status,
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Name => "name",
            SearchField::Key => "key",
            SearchField::KeyType => "key_type",
            SearchField::Status => "status",
        };
        f.write_str(name)
    }
}
