//! Axum extractor for request bodies with required fields
//!
//! `ValidatedJson<T>` parses the body and runs the `validator` rules derived
//! on `T` before the handler sees it. Failures never reach the core.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::core::ErrorResponse;

/// A JSON body that passed its presence rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_payee(
///     State(service): State<PayeeService>,
///     ValidatedJson(request): ValidatedJson<CreatePayeeRequest>,
/// ) -> Result<impl IntoResponse, PayeeError> {
///     // every required field is present here
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "rejected request body");
                let body = ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: rejection.body_text(),
                    details: None,
                };
                (rejection.status(), Json(body)).into_response()
            })?;

        payload.validate().map_err(|errors| {
            tracing::warn!(%errors, "missing required fields");
            required_fields_response(&errors)
        })?;

        Ok(ValidatedJson(payload))
    }
}

/// 400 listing every offending field, sorted by name
pub fn required_fields_response(errors: &ValidationErrors) -> Response {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| json!({ "campo": field.to_string(), "error": e.code.to_string() }))
        })
        .collect();
    fields.sort_by(|a, b| a["campo"].as_str().cmp(&b["campo"].as_str()));

    let body = ErrorResponse {
        code: "REQUIRED_FIELDS".to_string(),
        message: "campos obrigatórios".to_string(),
        details: Some(json!({ "campos": fields })),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
