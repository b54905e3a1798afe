//! # Recebedores
//!
//! Registration and lookup of payees ("recebedores") for Pix transfers.
//!
//! ## Features
//!
//! - **Tax id checks**: CPF and CNPJ check-digit validation
//! - **Pix key checks**: CPF, CNPJ, email, phone and random (UUID) keys
//! - **Lifecycle rules**: validated payees only accept email changes
//! - **Pluggable storage**: in-memory store, PostgreSQL behind the `postgres` feature
//! - **REST API**: axum routes under `/api/v1`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recebedores::prelude::*;
//!
//! let service = PayeeService::new(
//!     Arc::new(InMemoryPayeeStore::new()),
//!     PolicyConfig::default(),
//! );
//!
//! let payee = service
//!     .create(PayeeInput {
//!         tax_id: "615.546.455-30".to_string(),
//!         name: "Maria Souza".to_string(),
//!         key_type: "EMAIL".to_string(),
//!         key: "maria@example.com".to_string(),
//!         ..PayeeInput::default()
//!     })
//!     .await?;
//!
//! assert_eq!(payee.status, PayeeStatus::Rascunho);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        KeyType, PAGE_SIZE, PagedPayees, Payee, PayeeError, PayeeId, PayeeInput, PayeeResult,
        PayeeService, PayeeStatus, PayeeStore, PolicyConfig, SearchField, StorageError,
    };

    // === Validation ===
    pub use crate::core::validation::{
        is_any_valid_key, validate_cnpj, validate_cpf, validate_email, validate_key_of_type,
        validate_phone, validate_random_key,
    };

    // === Storage ===
    pub use crate::storage::InMemoryPayeeStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresPayeeStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
