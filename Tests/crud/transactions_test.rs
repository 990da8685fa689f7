use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Local;
use serde_json::{Value, json};
use tower::ServiceExt;
use wallet_backend::{
    controllayer::transactions::day_month,
    datalayer::{MemoryStore, Store},
    routes::create_router,
    state::AppState,
};

fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone()).with_password_cost(4);
    (create_router(state), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn list_request(token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/transactions")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Register `email` and return a bearer token for it
async fn signed_in_user(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/sign-up",
            None,
            json!({
                "nome": "Tester",
                "email": email,
                "senha": "secret1",
                "confirmacaoDeSenha": "secret1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, token) = send(
        app,
        json_request(
            "POST",
            "/sign-in",
            None,
            json!({"email": email, "senha": "secret1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    token
}

async fn list(app: &Router, token: &str) -> Vec<Value> {
    let (status, body) = send(app, list_request(token)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_posted_transaction_is_listed_with_server_fields() {
    let (app, store) = create_test_app();
    let token = signed_in_user(&app, "a@b.com").await;

    let before = day_month(Local::now().date_naive());
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            Some(&token),
            json!({"tipo": "income", "descricao": "salary", "valor": 1000}),
        ),
    )
    .await;
    let after = day_month(Local::now().date_naive());
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_empty());

    let user = store.find_user_by_email("a@b.com").await.unwrap().unwrap();
    let listed = list(&app, &token).await;

    assert_eq!(listed.len(), 1);
    let record = &listed[0];
    assert_eq!(record["tipo"], "income");
    assert_eq!(record["descricao"], "salary");
    assert_eq!(record["valor"], 1000.0);
    assert_eq!(record["userId"], user.id.to_string());
    assert!(record["id"].is_string());

    let date = record["data"].as_str().unwrap();
    assert!(date == before || date == after, "unexpected date {}", date);
}

#[tokio::test]
async fn test_transactions_are_private_to_their_owner() {
    let (app, _store) = create_test_app();
    let ana = signed_in_user(&app, "ana@b.com").await;
    let bia = signed_in_user(&app, "bia@b.com").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            Some(&ana),
            json!({"tipo": "expense", "descricao": "rent", "valor": 800}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(list(&app, &ana).await.len(), 1);
    assert!(list(&app, &bia).await.is_empty());
}

#[tokio::test]
async fn test_transactions_keep_insertion_order() {
    let (app, _store) = create_test_app();
    let token = signed_in_user(&app, "a@b.com").await;

    for (i, description) in ["coffee", "bus", "lunch"].iter().enumerate() {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/transactions",
                Some(&token),
                json!({"tipo": "expense", "descricao": description, "valor": i + 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let descriptions: Vec<String> = list(&app, &token)
        .await
        .iter()
        .map(|t| t["descricao"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(descriptions, vec!["coffee", "bus", "lunch"]);
}

#[tokio::test]
async fn test_numeric_string_amount_is_accepted() {
    let (app, _store) = create_test_app();
    let token = signed_in_user(&app, "a@b.com").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            Some(&token),
            json!({"tipo": "expense", "descricao": "bus", "valor": "4.40"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let listed = list(&app, &token).await;
    assert_eq!(listed[0]["valor"], 4.4);
}

#[tokio::test]
async fn test_invalid_body_is_rejected_without_storing() {
    let (app, _store) = create_test_app();
    let token = signed_in_user(&app, "a@b.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            Some(&token),
            json!({"tipo": "", "descricao": "salary", "valor": "a lot"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let messages: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        messages,
        vec!["\"tipo\" is not allowed to be empty", "\"valor\" must be a number"]
    );
    assert!(list(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_post_without_token_is_unauthorized() {
    let (app, _store) = create_test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            None,
            json!({"tipo": "income", "descricao": "salary", "valor": 1000}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/transactions",
            Some("made-up"),
            json!({"tipo": "income", "descricao": "salary", "valor": 1000}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_appends_are_all_recorded() {
    let (app, _store) = create_test_app();
    let token = signed_in_user(&app, "a@b.com").await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            send(
                &app,
                json_request(
                    "POST",
                    "/transactions",
                    Some(&token),
                    json!({"tipo": "income", "descricao": format!("entry {}", i), "valor": i}),
                ),
            )
            .await
            .0
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    assert_eq!(list(&app, &token).await.len(), 20);
}
