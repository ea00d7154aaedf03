//! Handler tests for Users domain
//!
//! These tests drive the page router with the in-memory repository:
//! - Form submission (URL-encoded body → validation → redirect or 422)
//! - Rendered HTML (listing, form, detail page)
//! - HTTP status codes for missing and malformed ids
//!
//! PostgreSQL-backed behaviour lives in `integration_test.rs`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use test_utils::assertions::assert_html_contains;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = UserService::with_encoder(
        InMemoryUserRepository::new(),
        Argon2PasswordEncoder::new(1024, 1, 1),
    );
    handlers::router(service, UserViews::new().unwrap())
}

// Helper to read an HTML response body
async fn html_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn ana() -> Vec<(&'static str, &'static str)> {
    vec![
        ("username", "ana"),
        ("firstName", ""),
        ("lastName", ""),
        ("email", "ana@example.com"),
        ("password", "secret"),
        ("role", "Usuario"),
        ("isActive", "1"),
        ("save", ""),
    ]
}

fn post_form(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users/create")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_users_empty() {
    let response = app().oneshot(get("/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "No hay usuarios.");
}

#[tokio::test]
async fn test_add_user_renders_empty_form() {
    let response = app().oneshot(get("/users/add")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, r#"<form method="post" action="/users/create""#);
    assert_html_contains(&html, "Selecciona un rol");
    assert!(!html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_create_user_redirects_to_listing() {
    let app = app();

    let response = app.clone().oneshot(post_form(&ana())).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/users");

    let response = app.oneshot(get("/users")).await.unwrap();
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "<td>ana</td>");
    assert_html_contains(&html, "<td>Usuario</td>");
    assert_html_contains(&html, "Sí");
}

#[tokio::test]
async fn test_create_user_invalid_email_rerenders_form() {
    let app = app();

    let mut fields = ana();
    fields[3] = ("email", "not-an-email");

    let response = app.clone().oneshot(post_form(&fields)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "This value is not a valid email address.");
    assert_html_contains(&html, r#"value="ana""#);
    assert!(!html.contains("secret"), "password must not be echoed");

    let response = app.oneshot(get("/users")).await.unwrap();
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "No hay usuarios.");
}

#[tokio::test]
async fn test_create_user_without_role_fails() {
    let fields: Vec<_> = ana().into_iter().filter(|(k, _)| *k != "role").collect();

    let response = app().oneshot(post_form(&fields)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "Please select a role.");
}

#[tokio::test]
async fn test_create_user_with_unknown_role_fails() {
    let mut fields = ana();
    fields[5] = ("role", "ROLE_ROOT");

    let response = app().oneshot(post_form(&fields)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "The selected choice is invalid.");
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = app();
    app.clone().oneshot(post_form(&ana())).await.unwrap();

    let mut fields = ana();
    fields[3] = ("email", "other@example.com");

    let response = app.oneshot(post_form(&fields)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "This value is already used.");
}

#[tokio::test]
async fn test_create_user_rejects_non_form_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/users/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"ana"}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_view_user_after_create() {
    let app = app();
    app.clone().oneshot(post_form(&ana())).await.unwrap();

    let response = app.oneshot(get("/users/view/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "Usuario: ana con Email: ana@example.com");
}

#[tokio::test]
async fn test_view_missing_user_returns_404() {
    let response = app().oneshot(get("/users/view/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "User 99 not found");
}

#[tokio::test]
async fn test_view_id_beyond_column_range_returns_404() {
    let response = app().oneshot(get("/users/view/99999999999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = html_body(response.into_body()).await;
    assert_html_contains(&html, "User 99999999999 not found");
}

#[tokio::test]
async fn test_view_non_numeric_id_returns_400() {
    let response = app().oneshot(get("/users/view/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_counts_every_created_user() {
    let app = app();

    for username in ["ana", "bob", "carla", "dario"] {
        let mut fields = ana();
        fields[0] = ("username", username);
        let response = app.clone().oneshot(post_form(&fields)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = app.oneshot(get("/users")).await.unwrap();
    let html = html_body(response.into_body()).await;
    assert_eq!(html.matches(r#"href="/users/view/"#).count(), 4);
}
