use crate::helpers::{response_json, spawn_app, valid_project};
use serde_json::json;

#[tokio::test]
async fn public_projects_are_listed_in_display_order() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    for (title, order) in [("Second", 2), ("First", 1), ("Third", 3)] {
        let mut project = valid_project();
        project["title"] = json!(title);
        project["order"] = json!(order);
        let response = app.post_json("/api/admin/projects", &project).await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let body = response_json(app.get("/api/projects").await).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn created_project_is_listed_with_identical_fields() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let mut project = valid_project();
    project["titleEn"] = json!("Campus Festival Poster");
    project["descriptionEn"] = json!("Promotional poster for a music festival");

    let response = app.post_json("/api/admin/projects", &project).await;
    assert_eq!(response.status().as_u16(), 201);
    let created = response_json(response).await["data"].clone();

    let body = response_json(app.get("/api/projects").await).await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);

    for field in [
        "title",
        "titleEn",
        "description",
        "descriptionEn",
        "category",
        "imageUrl",
        "featured",
        "order",
    ] {
        assert_eq!(listed[0][field], project[field], "{} changed on the way in", field);
    }
    assert!(listed[0]["id"].is_i64());
    assert!(listed[0]["createdAt"].is_string());
}

#[tokio::test]
async fn public_projects_can_be_filtered() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    app.post_json("/api/admin/projects", &valid_project()).await;
    let mut academic = valid_project();
    academic["category"] = json!("academicHelp");
    academic["featured"] = json!(false);
    app.post_json("/api/admin/projects", &academic).await;

    let body = response_json(app.get("/api/projects?category=academicHelp").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["category"], "academicHelp");

    let body = response_json(app.get("/api/projects?featured=true").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["featured"], true);
}

#[tokio::test]
async fn creating_a_project_requires_a_session() {
    let app = spawn_app().await;

    let response = app.post_json("/api/admin/projects", &valid_project()).await;

    assert_eq!(response.status().as_u16(), 401);
    let body = response_json(app.get("/api/projects").await).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn creating_a_project_with_missing_fields_returns_400() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let test_cases = vec![
        ("title", json!("")),
        ("description", json!("")),
        ("category", json!("photography")),
        ("imageUrl", json!("")),
        ("title", json!("   ")),
        ("description", json!(" \n ")),
        ("imageUrl", json!("  ")),
    ];

    for (field, value) in test_cases {
        let mut project = valid_project();
        project[field] = value;

        let response = app.post_json("/api/admin/projects", &project).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 when {} was invalid.",
            field
        );
    }

    let body = response_json(app.get("/api/projects").await).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn admin_can_update_and_delete_a_project() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let body = response_json(app.post_json("/api/admin/projects", &valid_project()).await).await;
    let project_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["order"], 2);

    let response = app
        .patch_json(
            &format!("/api/admin/projects/{}", project_id),
            &json!({ "titleEn": "Campus Festival Poster", "featured": false }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["titleEn"], "Campus Festival Poster");
    assert_eq!(body["data"]["featured"], false);
    assert_eq!(body["data"]["title"], "Poster Festival Kampus");

    let response = app.delete(&format!("/api/admin/projects/{}", project_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get(&format!("/api/admin/projects/{}", project_id)).await;
    assert_eq!(response.status().as_u16(), 404);
    let response = app.delete(&format!("/api/admin/projects/{}", project_id)).await;
    assert_eq!(response.status().as_u16(), 404);
}
