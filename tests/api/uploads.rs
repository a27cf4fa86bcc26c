use crate::helpers::{png_bytes, response_json, spawn_app, spawn_app_with};

fn files_in(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn uploaded_image_is_compressed_and_served() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let response = app
        .post_upload("image", "portfolio.png", "image/png", png_bytes(2400, 1200))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["compressed"], true);
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/") && url.ends_with(".jpg"));

    // Only the compressed file is left behind.
    let files = files_in(app.upload_dir.path());
    assert_eq!(files.len(), 1);
    assert!(url.ends_with(&files[0]));

    let served = app.get(&url).await;
    assert_eq!(served.status().as_u16(), 200);
    let bytes = served.bytes().await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert!(decoded.width() <= 1920 && decoded.height() <= 1080);
}

#[tokio::test]
async fn undecodable_image_falls_back_to_the_original_file() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let response = app
        .post_upload("file", "broken.png", "image/png", b"not really a png".to_vec())
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["compressed"], false);
    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/upload-") && url.ends_with(".png"));
    assert_eq!(app.get(url).await.status().as_u16(), 200);
}

#[tokio::test]
async fn non_image_uploads_are_rejected() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let test_cases = vec![
        ("notes.txt", "text/plain"),
        ("notes.txt", "image/png"),
        ("photo.png", "application/pdf"),
    ];

    for (file_name, mime) in test_cases {
        let response = app
            .post_upload("image", file_name, mime, b"hello".to_vec())
            .await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Upload of {} as {} was not rejected",
            file_name,
            mime
        );
    }
    assert!(files_in(app.upload_dir.path()).is_empty());
}

#[tokio::test]
async fn oversized_uploads_are_rejected() {
    let app = spawn_app_with(|config| config.uploads.max_file_size = 1024).await;
    app.login_as_admin().await;

    let response = app
        .post_upload("image", "big.png", "image/png", vec![0u8; 4096])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(files_in(app.upload_dir.path()).is_empty());
}

#[tokio::test]
async fn uploads_require_a_session() {
    let app = spawn_app().await;

    let response = app
        .post_upload("image", "portfolio.png", "image/png", png_bytes(10, 10))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}
