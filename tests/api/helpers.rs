use cipet_creative::cipet_web_server::run;
use cipet_creative::core::config::{
    AppConfig, CipetWebServer, CompressionConfig, DatabaseConfig, DiscordConfig, GeminiConfig,
    SessionConfig, UploadConfig,
};
use cipet_creative::core::{get_subscriber, init_subscriber, EventBroadcaster};
use cipet_creative::db;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::io::Cursor;
use std::net::TcpListener;
use tempfile::TempDir;
use wiremock::MockServer;

pub const ADMIN_USERNAME: &str = "cipet_owner";
pub const ADMIN_PASSWORD: &str = "s3cure-passw0rd";

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub mock_server: MockServer,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.api_client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_setup(&self, username: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/api/admin/setup",
            &json!({
                "username": username,
                "password": password,
                "email": "owner@cipet.test"
            }),
        )
        .await
    }

    pub async fn post_login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/api/admin/login",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Create the admin account and keep its session cookie on the client.
    pub async fn login_as_admin(&self) {
        assert_eq!(self.post_setup(ADMIN_USERNAME, ADMIN_PASSWORD).await.status(), 201);
        assert_eq!(self.post_login(ADMIN_USERNAME, ADMIN_PASSWORD).await.status(), 200);
    }

    pub async fn post_order(&self, body: &Value) -> reqwest::Response {
        self.post_json("/api/order", body).await
    }

    pub async fn post_upload(
        &self,
        field: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Invalid mime type");
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        self.api_client
            .post(self.url("/api/admin/upload"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_order() -> Value {
    json!({
        "name": "Rina Putri",
        "contact": "081234567890",
        "serviceCategory": "graphicDesign",
        "subService": "poster",
        "topic": "Poster for our campus music festival",
        "deadline": "Next Friday",
        "budget": "250.000"
    })
}

pub fn valid_project() -> Value {
    json!({
        "title": "Poster Festival Kampus",
        "description": "Poster promosi untuk festival musik",
        "category": "graphicDesign",
        "imageUrl": "/uploads/poster.jpg",
        "featured": true,
        "order": 2
    })
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 120])
    }));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode png");
    buffer.into_inner()
}

pub async fn response_json(response: reqwest::Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}

fn test_config(mock_server: &MockServer, upload_dir: &TempDir) -> AppConfig {
    AppConfig {
        cipet_server_config: CipetWebServer {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        uploads: UploadConfig {
            directory: upload_dir.path().to_string_lossy().into_owned(),
            max_file_size: 5 * 1024 * 1024,
        },
        compression: CompressionConfig::default(),
        session: SessionConfig {
            cookie_name: "cipet_admin_session".to_string(),
            ttl_hours: 24,
            secure_cookie: false,
        },
        discord: DiscordConfig {
            webhook_url: Some(Secret::new(format!("{}/webhook", mock_server.uri()))),
            timeout_seconds: 2,
        },
        gemini: GeminiConfig {
            api_key: Some(Secret::new("test-gemini-key".to_string())),
            base_url: mock_server.uri(),
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 2,
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Start the server on a random port against a fresh in-memory database.
/// `customise` may adjust the configuration before the server is built.
pub async fn spawn_app_with(customise: impl FnOnce(&mut AppConfig)) -> TestApp {
    Lazy::force(&TRACING);

    let mock_server = MockServer::start().await;
    let upload_dir = TempDir::new().expect("Failed to create upload directory");

    let mut configuration = test_config(&mock_server, &upload_dir);
    customise(&mut configuration);

    let db_pool = db::in_memory_pool()
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&db_pool)
        .await
        .expect("Failed to migrate the database");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = run(
        listener,
        db_pool.clone(),
        configuration,
        EventBroadcaster::default(),
    )
    .expect("Failed to build application.");
    let _ = tokio::spawn(server);

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_pool,
        api_client,
        mock_server,
        upload_dir,
    }
}
