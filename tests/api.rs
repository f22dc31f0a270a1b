//! End-to-end tests of the translation API over the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use translation_store::api::{create_router, AppState};
use translation_store::page::Page;
use translation_store::store::{MemoryPageStore, PageStore};

fn app() -> (Router, MemoryPageStore) {
    let store = MemoryPageStore::new();
    (create_router(AppState::new(Arc::new(store.clone()))), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn delete(app: &Router, page: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/pages/{page}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn home_welcome() -> Value {
    json!({
        "page": "home",
        "translations": {
            "welcome_message": { "en": "Welcome", "es": "Bienvenido" }
        }
    })
}

#[tokio::test]
async fn post_creates_page_with_translations() {
    let (app, store) = app();

    let (status, body) = post(&app, home_welcome()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "home");
    assert_eq!(body["translations"]["welcome_message"]["en"], "Welcome");
    assert_eq!(body["translations"]["welcome_message"]["es"], "Bienvenido");
    assert!(body["updatedAt"].is_string());

    let stored = store.find_by_name("home").await.unwrap().unwrap();
    let returned: Page = serde_json::from_value(body).unwrap();
    assert_eq!(stored, returned);
}

#[tokio::test]
async fn post_missing_translations_is_rejected_without_side_effects() {
    let (app, store) = app();

    let (status, body) = post(&app, json!({ "page": "home" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page and translations are required");
    assert!(store.is_empty());
}

#[tokio::test]
async fn post_null_translations_leaves_existing_page_untouched() {
    let (app, store) = app();
    post(&app, home_welcome()).await;
    let before = store.find_by_name("home").await.unwrap();

    let (status, _) = post(&app, json!({ "page": "home", "translations": null })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.find_by_name("home").await.unwrap(), before);
}

#[tokio::test]
async fn post_empty_page_name_is_rejected() {
    let (app, store) = app();

    let (status, body) = post(&app, json!({ "page": "", "translations": {} })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page and translations are required");
    assert!(store.is_empty());
}

#[tokio::test]
async fn post_malformed_translations_is_rejected_with_detail() {
    let (app, store) = app();

    let (status, body) = post(
        &app,
        json!({ "page": "home", "translations": { "welcome": { "en": 5 } } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page and translations are required");
    assert!(body["error"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn post_without_json_content_type_is_rejected() {
    let (app, store) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pages")
        .body(Body::from(home_welcome().to_string()))
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn post_updates_existing_translation_and_keeps_other_locales() {
    let (app, _) = app();
    post(&app, home_welcome()).await;

    let (status, body) = post(
        &app,
        json!({ "page": "home", "translations": { "welcome_message": { "en": "Hello" } } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"]["welcome_message"]["en"], "Hello");
    assert_eq!(body["translations"]["welcome_message"]["es"], "Bienvenido");

    let (status, body) = get(&app, "/pages?page=home&locale=es").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "welcome_message": "Bienvenido" }));
}

#[tokio::test]
async fn post_adds_new_key_to_existing_page() {
    let (app, _) = app();
    post(&app, home_welcome()).await;

    let (status, body) = post(
        &app,
        json!({
            "page": "home",
            "translations": { "cta_button": { "en": "Contact Us", "es": "Contáctanos" } }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"]["cta_button"]["en"], "Contact Us");
    assert_eq!(body["translations"]["cta_button"]["es"], "Contáctanos");
    assert_eq!(body["translations"]["welcome_message"]["en"], "Welcome");
}

#[tokio::test]
async fn repeated_identical_post_yields_same_content() {
    let (app, _) = app();

    let (_, first) = post(&app, home_welcome()).await;
    let (_, second) = post(&app, home_welcome()).await;

    assert_eq!(first["page"], second["page"]);
    assert_eq!(first["translations"], second["translations"]);
}

#[tokio::test]
async fn post_accepts_key_without_locales() {
    let (app, _) = app();

    let (status, body) = post(
        &app,
        json!({ "page": "home", "translations": { "placeholder": {} } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"]["placeholder"], json!({}));

    let (_, body) = get(&app, "/pages?page=home&locale=en").await;
    assert_eq!(body["placeholder"], "Translation missing for en");
}

#[tokio::test]
async fn get_returns_every_key_for_locale() {
    let (app, _) = app();
    post(
        &app,
        json!({
            "page": "home",
            "translations": {
                "welcome_message": { "en": "Welcome", "es": "Bienvenido" },
                "cta_button": { "en": "Contact Us" }
            }
        }),
    )
    .await;

    let (status, body) = get(&app, "/pages?page=home&locale=es").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "welcome_message": "Bienvenido",
            "cta_button": "Translation missing for es"
        })
    );
}

#[tokio::test]
async fn get_missing_locale_is_bad_request() {
    let (app, _) = app();

    let (status, body) = get(&app, "/pages?page=home").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page and locale are required");

    let (status, _) = get(&app, "/pages?page=&locale=en").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_repeated_query_param_is_json_bad_request() {
    let (app, _) = app();
    post(&app, home_welcome()).await;

    let (status, body) = get(&app, "/pages?page=home&page=about&locale=en").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page and locale are required");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_stored_empty_string_returns_placeholder() {
    let (app, store) = app();
    post(&app, home_welcome()).await;
    post(
        &app,
        json!({ "page": "home", "translations": { "welcome_message": { "en": "" } } }),
    )
    .await;

    let (status, body) = get(&app, "/pages?page=home&locale=en").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "welcome_message": "Translation missing for en" }));
    let stored = store.find_by_name("home").await.unwrap().unwrap();
    assert_eq!(stored.translations.lookup("welcome_message", "en"), Some(""));
    assert_eq!(stored.translations.lookup("welcome_message", "es"), Some("Bienvenido"));
}

#[tokio::test]
async fn get_unknown_page_is_not_found() {
    let (app, _) = app();

    let (status, body) = get(&app, "/pages?page=about&locale=en").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No translations found for page: about");
}

#[tokio::test]
async fn delete_removes_page() {
    let (app, store) = app();
    post(&app, home_welcome()).await;

    let (status, body) = delete(&app, "home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Page home deleted successfully");
    assert_eq!(store.find_by_name("home").await.unwrap(), None);

    let (status, _) = get(&app, "/pages?page=home&locale=en").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_page_is_not_found() {
    let (app, _) = app();

    let (status, body) = delete(&app, "about").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page about not found");
}

#[tokio::test]
async fn storage_failures_map_to_500() {
    let (app, store) = app();
    post(&app, home_welcome()).await;

    store.set_fail_reads(true);
    let (status, body) = get(&app, "/pages?page=home&locale=en").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error fetching translations");
    assert!(body["error"].is_string());
    store.set_fail_reads(false);

    store.set_fail_writes(true);
    let (status, body) = post(&app, home_welcome()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error saving page translations");

    let (status, body) = delete(&app, "home").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error deleting page");
    assert_eq!(store.len(), 1);
}
