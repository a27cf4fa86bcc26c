use crate::helpers::{response_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn updated_settings_are_visible_publicly() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let response = app
        .put_json("/api/admin/settings/whatsapp_number", &json!({ "value": "6281234567890" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    app.put_json("/api/admin/settings/whatsapp_number", &json!({ "value": "6289876543210" }))
        .await;

    let body = response_json(app.get("/api/settings").await).await;
    let settings = body["data"].as_array().unwrap();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0]["key"], "whatsapp_number");
    assert_eq!(settings[0]["value"], "6289876543210");
}

#[tokio::test]
async fn invalid_setting_keys_are_rejected() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let response = app
        .put_json("/api/admin/settings/bad%20key", &json!({ "value": "x" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn updating_settings_requires_a_session() {
    let app = spawn_app().await;

    let response = app
        .put_json("/api/admin/settings/hero_title", &json!({ "value": "Halo" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}
