//! Typed error handling for payee operations
//!
//! Every failure the core can report is a variant of [`PayeeError`], so the
//! presentation layer can map kinds to transport codes without string
//! matching.
//!
//! # Error Categories
//!
//! - Field validation: `EmailInvalid`, `NameInvalid`, `CpfInvalid`,
//!   `CnpjInvalid`, `KeyInvalid`, `KeyTypeInvalid`, `KeyTypeMismatch`,
//!   `StatusInvalid`, `KeyAlreadyRegistered`
//! - Lookup: `NotFound`
//! - State: `EditNotAllowed`
//! - Aggregate: `PartialDelete`
//! - Storage: [`StorageError`], passed through untouched
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get_by_id(42).await {
//!     Ok(payee) => println!("{}", payee.name),
//!     Err(PayeeError::NotFound { id }) => println!("payee {} not found", id),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::payee::PayeeId;

/// The error type returned by every payee operation
#[derive(Debug, thiserror::Error)]
pub enum PayeeError {
    #[error("email inválido")]
    EmailInvalid,

    #[error("nome deve ter mais de 2 caracteres")]
    NameInvalid,

    #[error("cpf inválido")]
    CpfInvalid,

    #[error("cnpj inválido")]
    CnpjInvalid,

    /// The key matches no known key shape at all
    #[error("chave inválida")]
    KeyInvalid,

    #[error("tipo de chave inválido")]
    KeyTypeInvalid,

    /// The key is a valid shape, but for a different key type
    #[error("chave não corresponde ao tipo de chave informado")]
    KeyTypeMismatch,

    #[error("status inválido")]
    StatusInvalid,

    #[error("chave pix já cadastrada")]
    KeyAlreadyRegistered,

    #[error("recebedor {id} não existe")]
    NotFound { id: PayeeId },

    #[error("recebedor {id} com status Validado apenas permite edição de email")]
    EditNotAllowed { id: PayeeId },

    /// Bulk delete finished with at least one failure
    #[error("recebedores não deletados: {failed:?}")]
    PartialDelete {
        succeeded: Vec<PayeeId>,
        failed: Vec<PayeeId>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures raised by a storage collaborator
///
/// The core never inspects these; they travel to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to connect to {backend}: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    #[error("{backend} query error: {message}")]
    Query {
        backend: &'static str,
        message: String,
    },

    #[error("data integrity error: {message}")]
    Integrity { message: String },
}

/// Error response body for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PayeeError {
    /// True for errors caused by the submitted data rather than by state or storage
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PayeeError::EmailInvalid
                | PayeeError::NameInvalid
                | PayeeError::CpfInvalid
                | PayeeError::CnpjInvalid
                | PayeeError::KeyInvalid
                | PayeeError::KeyTypeInvalid
                | PayeeError::KeyTypeMismatch
                | PayeeError::StatusInvalid
                | PayeeError::KeyAlreadyRegistered
        )
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            PayeeError::NotFound { .. } => StatusCode::NOT_FOUND,
            PayeeError::EditNotAllowed { .. } => StatusCode::CONFLICT,
            PayeeError::PartialDelete { .. } => StatusCode::MULTI_STATUS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PayeeError::EmailInvalid => "EMAIL_INVALID",
            PayeeError::NameInvalid => "NAME_INVALID",
            PayeeError::CpfInvalid => "CPF_INVALID",
            PayeeError::CnpjInvalid => "CNPJ_INVALID",
            PayeeError::KeyInvalid => "KEY_INVALID",
            PayeeError::KeyTypeInvalid => "KEY_TYPE_INVALID",
            PayeeError::KeyTypeMismatch => "KEY_TYPE_MISMATCH",
            PayeeError::StatusInvalid => "STATUS_INVALID",
            PayeeError::KeyAlreadyRegistered => "KEY_ALREADY_REGISTERED",
            PayeeError::NotFound { .. } => "PAYEE_NOT_FOUND",
            PayeeError::EditNotAllowed { .. } => "EDIT_NOT_ALLOWED",
            PayeeError::PartialDelete { .. } => "PARTIAL_DELETE",
            PayeeError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            PayeeError::Storage(_) => "erro interno no servidor".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PayeeError::NotFound { id } | PayeeError::EditNotAllowed { id } => {
                Some(serde_json::json!({ "id": id }))
            }
            PayeeError::PartialDelete { succeeded, failed } => Some(serde_json::json!({
                "ids_com_sucesso": succeeded,
                "ids_sem_sucesso": failed
            })),
            _ => None,
        }
    }
}

impl IntoResponse for PayeeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Connection {
                    backend: "PostgreSQL",
                    message: err.to_string(),
                }
            }
            other => StorageError::Query {
                backend: "PostgreSQL",
                message: other.to_string(),
            },
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for PayeeError {
    fn from(err: sqlx::Error) -> Self {
        PayeeError::Storage(err.into())
    }
}

/// A specialized Result type for payee operations
pub type PayeeResult<T> = Result<T, PayeeError>;
