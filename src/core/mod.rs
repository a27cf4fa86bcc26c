pub mod config;
mod responses;
pub mod session;
mod telemetry;
pub mod events;
pub mod image_service;
pub mod webhook_service;
pub mod translation_service;

pub use self::config::AppConfig;
pub use events::{ChangeAction, EventBroadcaster, LiveEvent};
pub use responses::*;
pub use session::{AdminSession, SessionStore};
pub use telemetry::*;
pub use translation_service::TranslationService;
pub use webhook_service::WebhookService;
