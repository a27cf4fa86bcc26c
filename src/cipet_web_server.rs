use crate::core::{AppConfig, AppError, EventBroadcaster, SessionStore, TranslationService, WebhookService};
use crate::db;
use crate::routes::cipet_routes;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct CipetWebServer {
    port: u16,
    server: Server,
}

impl CipetWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.cipet_server_config.host, configuration.cipet_server_config.port
        );

        let pool = db::connect_lazy(&configuration.database)?;
        db::migrate(&pool).await?;

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool, configuration, EventBroadcaster::default())?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    pool: SqlitePool,
    configuration: AppConfig,
    broadcaster: EventBroadcaster,
) -> Result<Server, anyhow::Error> {
    let pool = Data::new(pool);
    let broadcaster = Data::new(broadcaster);
    let sessions = Data::new(SessionStore::new(&configuration.session));
    let webhook = Data::new(WebhookService::new(&configuration.discord));
    let translator = Data::new(TranslationService::new(&configuration.gemini));
    let upload_config = Data::new(configuration.uploads.clone());
    let compression_config = Data::new(configuration.compression.clone());
    let upload_dir = configuration.uploads.directory.clone();

    std::fs::create_dir_all(&upload_dir)?;

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .supports_credentials();

        let json_config = web::JsonConfig::default()
            .limit(256 * 1024)
            .error_handler(|err, _req| {
                AppError::bad_request(format!("Invalid request body: {}", err)).into()
            });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            AppError::bad_request(format!("Invalid query string: {}", err)).into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            .app_data(query_config)
            .app_data(pool.clone())
            .app_data(broadcaster.clone())
            .app_data(sessions.clone())
            .app_data(webhook.clone())
            .app_data(translator.clone())
            .app_data(upload_config.clone())
            .app_data(compression_config.clone())
            .service(actix_files::Files::new("/uploads", upload_dir.clone()))
            .configure(cipet_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
