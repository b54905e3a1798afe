//! HTTP handlers for payee operations
//!
//! Handlers only translate between HTTP and [`PayeeService`]; every business
//! rule lives in the core. Errors render through `PayeeError`'s
//! `IntoResponse`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use validator::Validate;

use super::extractor::ValidatedJson;
use crate::core::{
    PageParams, PagedPayees, Payee, PayeeError, PayeeId, PayeeInput, PayeeService,
};

/// Read an explicit JSON `null` as the field's default, so that it fails the
/// same presence rule as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /recebedores`
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePayeeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub cpf_cnpj: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub nome: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub tipo_chave_pix: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub chave_pix: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl From<CreatePayeeRequest> for PayeeInput {
    fn from(req: CreatePayeeRequest) -> Self {
        PayeeInput {
            id: 0,
            tax_id: req.cpf_cnpj,
            name: req.nome,
            key_type: req.tipo_chave_pix,
            key: req.chave_pix,
            email: req.email,
        }
    }
}

/// Body of `PATCH /recebedores`: the full record, id included
#[derive(Debug, Deserialize, Validate)]
pub struct EditPayeeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, code = "required"))]
    pub id: PayeeId,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub cpf_cnpj: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub nome: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub tipo_chave_pix: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub chave_pix: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl From<EditPayeeRequest> for PayeeInput {
    fn from(req: EditPayeeRequest) -> Self {
        PayeeInput {
            id: req.id,
            tax_id: req.cpf_cnpj,
            name: req.nome,
            key_type: req.tipo_chave_pix,
            key: req.chave_pix,
            email: req.email,
        }
    }
}

/// Body of `PATCH /recebedores/{id}`
#[derive(Debug, Deserialize, Validate)]
pub struct EditEmailRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub email: String,
}

/// Body of `DELETE /recebedores/deletar`
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteManyRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub ids: Vec<PayeeId>,
}

/// Query of `GET /recebedores/chave`
#[derive(Debug, Deserialize)]
pub struct KeySearchParams {
    #[serde(default)]
    pub chave: String,

    #[serde(default)]
    pub pagina: Option<i64>,
}

impl KeySearchParams {
    pub fn page(&self) -> usize {
        PageParams {
            page: self.pagina.unwrap_or(1),
        }
        .page()
    }
}

pub async fn create_payee(
    State(service): State<PayeeService>,
    ValidatedJson(request): ValidatedJson<CreatePayeeRequest>,
) -> Result<(StatusCode, Json<Payee>), PayeeError> {
    let payee = service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(payee)))
}

pub async fn edit_payee(
    State(service): State<PayeeService>,
    ValidatedJson(request): ValidatedJson<EditPayeeRequest>,
) -> Result<Json<Payee>, PayeeError> {
    let payee = service.edit(request.into()).await?;
    Ok(Json(payee))
}

pub async fn edit_payee_email(
    State(service): State<PayeeService>,
    Path(id): Path<PayeeId>,
    ValidatedJson(request): ValidatedJson<EditEmailRequest>,
) -> Result<Json<Value>, PayeeError> {
    service.edit_email(id, &request.email).await?;
    Ok(Json(json!({ "id": id, "email": request.email.to_lowercase() })))
}

pub async fn get_payee(
    State(service): State<PayeeService>,
    Path(id): Path<PayeeId>,
) -> Result<Json<Payee>, PayeeError> {
    Ok(Json(service.get_by_id(id).await?))
}

pub async fn delete_payee(
    State(service): State<PayeeService>,
    Path(id): Path<PayeeId>,
) -> Result<StatusCode, PayeeError> {
    service.delete(id).await?;
    Ok(StatusCode::OK)
}

/// 200 when every id was removed; `PartialDelete` renders as 207 with both lists
pub async fn delete_payees(
    State(service): State<PayeeService>,
    ValidatedJson(request): ValidatedJson<DeleteManyRequest>,
) -> Result<Json<Value>, PayeeError> {
    service.delete_many(&request.ids).await?;
    Ok(Json(json!({ "ids_com_sucesso": request.ids })))
}

pub async fn search_by_name(
    State(service): State<PayeeService>,
    Path(name): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedPayees>, PayeeError> {
    Ok(Json(service.search_by_name(&name, params.page()).await?))
}

pub async fn search_by_status(
    State(service): State<PayeeService>,
    Path(status): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedPayees>, PayeeError> {
    Ok(Json(service.search_by_status(&status, params.page()).await?))
}

pub async fn search_by_key_type(
    State(service): State<PayeeService>,
    Path(key_type): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedPayees>, PayeeError> {
    Ok(Json(
        service
            .search_by_key_type(&key_type, params.page())
            .await?,
    ))
}

pub async fn search_by_key(
    State(service): State<PayeeService>,
    Query(params): Query<KeySearchParams>,
) -> Result<Json<PagedPayees>, PayeeError> {
    Ok(Json(
        service
            .search_by_key(&params.chave, params.page())
            .await?,
    ))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "recebedores"
    }))
}
