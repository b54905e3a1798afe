//! Route table for the payee API

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_payee, delete_payee, delete_payees, edit_payee, edit_payee_email, get_payee,
    health_check, search_by_key, search_by_key_type, search_by_name, search_by_status,
};
use crate::core::PayeeService;

/// Prefix of every payee route
pub const API_PREFIX: &str = "/api/v1";

/// Build payee routes
///
/// - POST   /recebedores - Create a payee
/// - PATCH  /recebedores - Replace every field of a payee (id in body)
/// - PATCH  /recebedores/{id} - Change only the email
/// - DELETE /recebedores/{id} - Delete one payee
/// - DELETE /recebedores/deletar - Delete several payees (ids in body)
/// - GET    /recebedores/id/{id} - Get one payee
/// - GET    /recebedores/nome/{nome}?pagina= - Search by name
/// - GET    /recebedores/status/{status}?pagina= - Search by status
/// - GET    /recebedores/tipoChave/{tipo}?pagina= - Search by key type
/// - GET    /recebedores/chave?chave=&pagina= - Search by key
pub fn payee_routes(service: PayeeService) -> Router {
    Router::new()
        .route("/recebedores", post(create_payee).patch(edit_payee))
        .route("/recebedores/deletar", delete(delete_payees))
        .route(
            "/recebedores/{id}",
            patch(edit_payee_email).delete(delete_payee),
        )
        .route("/recebedores/id/{id}", get(get_payee))
        .route("/recebedores/nome/{nome}", get(search_by_name))
        .route("/recebedores/status/{status}", get(search_by_status))
        .route("/recebedores/tipoChave/{tipo}", get(search_by_key_type))
        .route("/recebedores/chave", get(search_by_key))
        .with_state(service)
}

/// Full application router: payee API under [`API_PREFIX`], health checks
/// at the root, every request traced
pub fn build_router(service: PayeeService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .nest(API_PREFIX, payee_routes(service))
        .layer(TraceLayer::new_for_http())
}
