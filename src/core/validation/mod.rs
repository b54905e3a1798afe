//! Payee validation and normalization
//!
//! Pure functions only: checksum and format validators, the rule policy
//! that combines them, and the normalizer applied after validation passes.

pub mod checksum;
pub mod formats;
pub mod normalize;
pub mod policy;

pub use checksum::{validate_cnpj, validate_cpf};
pub use formats::{
    is_any_valid_key, is_valid_key_type, validate_email, validate_key_of_type, validate_phone,
    validate_random_key,
};
pub use normalize::{
    canonical_key, digits_only, format_cnpj, format_cpf, format_tax_id, normalize,
};
pub use policy::{
    ValidatedPayee, validate_email_change, validate_for_create, validate_for_edit, validate_tax_id,
};
