use crate::helpers::{response_json, spawn_app, spawn_app_with};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn translate_returns_the_gemini_translation() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Campus festival poster" }] } }]
        })))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let response = app
        .post_json("/api/admin/translate", &json!({ "text": "Poster festival kampus" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["original"], "Poster festival kampus");
    assert_eq!(body["data"]["translated"], "Campus festival poster");
}

#[tokio::test]
async fn translate_returns_the_input_without_an_api_key() {
    let app = spawn_app_with(|config| config.gemini.api_key = None).await;
    app.login_as_admin().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let response = app
        .post_json("/api/admin/translate", &json!({ "text": "Makalah sejarah" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["translated"], "Makalah sejarah");
}

#[tokio::test]
async fn translate_returns_the_input_when_gemini_fails() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.mock_server)
        .await;

    let body = response_json(
        app.post_json("/api/admin/translate", &json!({ "text": "Ringkasan buku" }))
            .await,
    )
    .await;

    assert_eq!(body["data"]["translated"], "Ringkasan buku");
}

#[tokio::test]
async fn translate_rejects_empty_text() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let response = app
        .post_json("/api/admin/translate", &json!({ "text": "   " }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
