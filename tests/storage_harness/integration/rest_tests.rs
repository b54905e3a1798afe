//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that
//! validate a `PayeeStore` through full REST round-trips:
//! JSON → HTTP request → handler → PayeeService → store → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce a fresh, empty
/// `impl PayeeStore + Clone + 'static`.
///
/// # Generated Tests
///
/// - Create: normalized 201 body, missing fields, rule violations, duplicate key
/// - Get / Edit: found, not found, full replacement, missing id
/// - Lifecycle: full edit of a `Validado` payee is 409, its email edit is 200
/// - Delete: single, bulk, bulk with missing ids (207 with both lists)
/// - Search: name paging, key, status and key type, rejected query values
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use recebedores::core::{PayeeStatus, PayeeStore, PolicyConfig};
            use serde_json::{Value, json};
            use std::sync::Arc;
            use crate::storage_harness::integration::{create_body, create_via_api, test_server};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                test_server(Arc::new(store), PolicyConfig::default())
            }

            // ==============================================================
            // Create
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server
                    .post("/api/v1/recebedores")
                    .json(&json!({
                        "cpf_cnpj": "41916896000130",
                        "nome": "ACME Pagamentos",
                        "tipo_chave_pix": "CNPJ",
                        "chave_pix": "41916896000130",
                        "email": "Financeiro@ACME.com"
                    }))
                    .await;

                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert!(body["id"].as_i64().unwrap() > 0);
                assert_eq!(body["cpf_cnpj"], "41.916.896/0001-30");
                assert_eq!(body["chave_pix"], "41.916.896/0001-30");
                assert_eq!(body["nome"], "acme pagamentos");
                assert_eq!(body["email"], "financeiro@acme.com");
                assert_eq!(body["tipo_chave_pix"], "CNPJ");
                assert_eq!(body["status"], "Rascunho");
            }

            #[tokio::test]
            async fn test_rest_create_missing_fields() {
                let server = make_server().await;

                let response = server
                    .post("/api/v1/recebedores")
                    .json(&json!({ "nome": "Ana Lima" }))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "REQUIRED_FIELDS");
                let fields: Vec<&str> = body["details"]["campos"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|c| c["campo"].as_str().unwrap())
                    .collect();
                assert_eq!(fields, vec!["chave_pix", "cpf_cnpj", "tipo_chave_pix"]);
            }

            #[tokio::test]
            async fn test_rest_create_null_fields() {
                let server = make_server().await;

                let mut body = create_body("Ana Lima", "ana@pix.com");
                body["nome"] = Value::Null;
                let response = server.post("/api/v1/recebedores").json(&body).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "REQUIRED_FIELDS");
                assert_eq!(body["details"]["campos"][0]["campo"], "nome");
            }

            #[tokio::test]
            async fn test_rest_create_rule_violation() {
                let server = make_server().await;

                let mut body = create_body("Ana Lima", "ana@pix.com");
                body["cpf_cnpj"] = json!("189.307.395-56");
                let response = server.post("/api/v1/recebedores").json(&body).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "CPF_INVALID");

                let mut body = create_body("Ana Lima", "41.916.896/0001-30");
                body["tipo_chave_pix"] = json!("CPF");
                let response = server.post("/api/v1/recebedores").json(&body).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "KEY_TYPE_MISMATCH");
            }

            #[tokio::test]
            async fn test_rest_create_duplicate_key() {
                let server = make_server().await;
                create_via_api(&server, "Ana Lima", "ana@pix.com").await;

                let response = server
                    .post("/api/v1/recebedores")
                    .json(&create_body("Outra Pessoa", "ana@pix.com"))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "KEY_ALREADY_REGISTERED");
            }

            // ==============================================================
            // Get / Edit
            // ==============================================================

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let id = create_via_api(&server, "Bruno Alves", "bruno@pix.com").await;

                let response = server.get(&format!("/api/v1/recebedores/id/{}", id)).await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["id"], id);
                assert_eq!(body["nome"], "bruno alves");
                assert_eq!(body["chave_pix"], "bruno@pix.com");
            }

            #[tokio::test]
            async fn test_rest_get_not_found() {
                let server = make_server().await;

                let response = server.get("/api/v1/recebedores/id/999999").await;
                response.assert_status(StatusCode::NOT_FOUND);

                let body: Value = response.json();
                assert_eq!(body["code"], "PAYEE_NOT_FOUND");
                assert_eq!(body["details"]["id"], 999999);
            }

            #[tokio::test]
            async fn test_rest_edit() {
                let server = make_server().await;
                let id = create_via_api(&server, "Carla Dias", "carla@pix.com").await;

                let response = server
                    .patch("/api/v1/recebedores")
                    .json(&json!({
                        "id": id,
                        "cpf_cnpj": "51576203069",
                        "nome": "Carla Dias Souza",
                        "tipo_chave_pix": "TELEFONE",
                        "chave_pix": "+5511998765432"
                    }))
                    .await;
                response.assert_status(StatusCode::OK);

                let stored: Value = server
                    .get(&format!("/api/v1/recebedores/id/{}", id))
                    .await
                    .json();
                assert_eq!(stored["cpf_cnpj"], "515.762.030-69");
                assert_eq!(stored["nome"], "carla dias souza");
                assert_eq!(stored["tipo_chave_pix"], "TELEFONE");
                assert_eq!(stored["chave_pix"], "+5511998765432");
                assert_eq!(stored["status"], "Rascunho");
            }

            #[tokio::test]
            async fn test_rest_edit_without_id() {
                let server = make_server().await;

                let mut body = create_body("Carla Dias", "carla@pix.com");
                body["id"] = json!(0);
                let response = server.patch("/api/v1/recebedores").json(&body).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "REQUIRED_FIELDS");
            }

            // ==============================================================
            // Lifecycle
            // ==============================================================

            async fn validated_payee() -> (TestServer, i64) {
                let store = $store_factory;
                let server = test_server(Arc::new(store.clone()), PolicyConfig::default());
                let id = create_via_api(&server, "Davi Rocha", "davi@pix.com").await;

                let mut payee = store.get(id).await.unwrap().unwrap();
                payee.status = PayeeStatus::Validado;
                store.update(&payee).await.unwrap();

                (server, id)
            }

            #[tokio::test]
            async fn test_rest_edit_validated_conflict() {
                let (server, id) = validated_payee().await;

                let mut body = create_body("Davi Rocha Filho", "davi@pix.com");
                body["id"] = json!(id);
                let response = server.patch("/api/v1/recebedores").json(&body).await;

                response.assert_status(StatusCode::CONFLICT);
                assert_eq!(response.json::<Value>()["code"], "EDIT_NOT_ALLOWED");

                let stored: Value = server
                    .get(&format!("/api/v1/recebedores/id/{}", id))
                    .await
                    .json();
                assert_eq!(stored["nome"], "davi rocha");
            }

            #[tokio::test]
            async fn test_rest_edit_email_validated() {
                let (server, id) = validated_payee().await;

                let response = server
                    .patch(&format!("/api/v1/recebedores/{}", id))
                    .json(&json!({ "email": "Davi@Rocha.com" }))
                    .await;
                response.assert_status(StatusCode::OK);

                let stored: Value = server
                    .get(&format!("/api/v1/recebedores/id/{}", id))
                    .await
                    .json();
                assert_eq!(stored["email"], "davi@rocha.com");
                assert_eq!(stored["status"], "Validado");
            }

            #[tokio::test]
            async fn test_rest_edit_email_invalid() {
                let server = make_server().await;
                let id = create_via_api(&server, "Eva Nunes", "eva@pix.com").await;

                let response = server
                    .patch(&format!("/api/v1/recebedores/{}", id))
                    .json(&json!({ "email": "eva@" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "EMAIL_INVALID");
            }

            // ==============================================================
            // Delete
            // ==============================================================

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let id = create_via_api(&server, "Fabio Melo", "fabio@pix.com").await;

                server
                    .delete(&format!("/api/v1/recebedores/{}", id))
                    .await
                    .assert_status(StatusCode::OK);

                server
                    .get(&format!("/api/v1/recebedores/id/{}", id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                server
                    .delete(&format!("/api/v1/recebedores/{}", id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_delete_many() {
                let server = make_server().await;
                let a = create_via_api(&server, "Gabi", "gabi@pix.com").await;
                let b = create_via_api(&server, "Hugo", "hugo@pix.com").await;

                let response = server
                    .delete("/api/v1/recebedores/deletar")
                    .json(&json!({ "ids": [a, b] }))
                    .await;
                response.assert_status(StatusCode::OK);
            }

            #[tokio::test]
            async fn test_rest_delete_many_partial() {
                let server = make_server().await;
                let a = create_via_api(&server, "Ines", "ines@pix.com").await;
                let b = create_via_api(&server, "Joao", "joao@pix.com").await;
                let missing = [b + 1000, b + 1001];

                let response = server
                    .delete("/api/v1/recebedores/deletar")
                    .json(&json!({ "ids": [a, b, missing[0], missing[1]] }))
                    .await;

                response.assert_status(StatusCode::MULTI_STATUS);
                let body: Value = response.json();
                assert_eq!(body["code"], "PARTIAL_DELETE");
                assert_eq!(body["details"]["ids_com_sucesso"], json!([a, b]));
                assert_eq!(body["details"]["ids_sem_sucesso"], json!(missing));

                server
                    .get(&format!("/api/v1/recebedores/id/{}", a))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_delete_many_empty_ids() {
                let server = make_server().await;

                let response = server
                    .delete("/api/v1/recebedores/deletar")
                    .json(&json!({ "ids": [] }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Search
            // ==============================================================

            #[tokio::test]
            async fn test_rest_search_name_paging() {
                let server = make_server().await;
                for i in 0..12 {
                    create_via_api(&server, "Homonimo", &format!("h{}@pix.com", i)).await;
                }

                let first: Value = server
                    .get("/api/v1/recebedores/nome/HOMONIMO")
                    .await
                    .json();
                assert_eq!(first["total"], 12);
                assert_eq!(first["por_pagina"], 10);
                assert_eq!(first["pagina_atual"], 1);
                assert_eq!(first["total_paginas"], 2);
                assert_eq!(first["recebedores"].as_array().unwrap().len(), 10);

                let second: Value = server
                    .get("/api/v1/recebedores/nome/homonimo")
                    .add_query_param("pagina", 2)
                    .await
                    .json();
                assert_eq!(second["pagina_atual"], 2);
                assert_eq!(second["recebedores"].as_array().unwrap().len(), 2);

                let clamped: Value = server
                    .get("/api/v1/recebedores/nome/homonimo")
                    .add_query_param("pagina", -4)
                    .await
                    .json();
                assert_eq!(clamped["pagina_atual"], 1);
            }

            #[tokio::test]
            async fn test_rest_search_page_far_past_the_end() {
                let server = make_server().await;
                create_via_api(&server, "Anabela", "anabela@pix.com").await;

                let response = server
                    .get("/api/v1/recebedores/nome/anabela")
                    .add_query_param("pagina", i64::MAX)
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["total"], 1);
                assert_eq!(body["pagina_atual"], i64::MAX);
                assert!(body["recebedores"].as_array().unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_rest_search_by_bare_digit_key() {
                let server = make_server().await;
                let mut body = create_body("Acme", "41.916.896/0001-30");
                body["tipo_chave_pix"] = json!("CNPJ");
                server
                    .post("/api/v1/recebedores")
                    .json(&body)
                    .await
                    .assert_status(StatusCode::CREATED);

                let found: Value = server
                    .get("/api/v1/recebedores/chave")
                    .add_query_param("chave", "41916896000130")
                    .await
                    .json();
                assert_eq!(found["total"], 1);
                assert_eq!(found["recebedores"][0]["chave_pix"], "41.916.896/0001-30");
            }

            #[tokio::test]
            async fn test_rest_search_by_key() {
                let server = make_server().await;
                create_via_api(&server, "Karen", "karen@pix.com").await;

                let response = server
                    .get("/api/v1/recebedores/chave")
                    .add_query_param("chave", "karen@pix.com")
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["total"], 1);
                assert_eq!(body["recebedores"][0]["nome"], "karen");
            }

            #[tokio::test]
            async fn test_rest_search_by_status_and_key_type() {
                let server = make_server().await;
                create_via_api(&server, "Lucas", "lucas@pix.com").await;
                create_via_api(&server, "Marta", "marta@pix.com").await;

                let by_status: Value = server
                    .get("/api/v1/recebedores/status/Rascunho")
                    .await
                    .json();
                assert_eq!(by_status["total"], 2);

                let by_type: Value = server
                    .get("/api/v1/recebedores/tipoChave/EMAIL")
                    .await
                    .json();
                assert_eq!(by_type["total"], 2);

                let none: Value = server
                    .get("/api/v1/recebedores/tipoChave/CPF")
                    .await
                    .json();
                assert_eq!(none["total"], 0);
                assert_eq!(none["total_paginas"], 0);
            }

            #[tokio::test]
            async fn test_rest_search_rejects_bad_values() {
                let server = make_server().await;

                let response = server.get("/api/v1/recebedores/status/Aprovado").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "STATUS_INVALID");

                let response = server.get("/api/v1/recebedores/tipoChave/PIX").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "KEY_TYPE_INVALID");

                let response = server
                    .get("/api/v1/recebedores/chave")
                    .add_query_param("chave", "0000020203")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "KEY_INVALID");
            }

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;
                let response = server.get("/health").await;
                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>()["status"], "ok");
            }
        }
    };
}
