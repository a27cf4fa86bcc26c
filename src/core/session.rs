use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::sync::RwLock;

use crate::core::config::SessionConfig;
use crate::core::AppError;
use crate::models::admins::Admin;

const TOKEN_LENGTH: usize = 48;

#[derive(Debug, Clone)]
pub struct SessionData {
    pub admin_id: i64,
    pub username: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

/// Server-held admin sessions, keyed by the opaque token stored in the cookie.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
    cookie_name: String,
    ttl: Duration,
    secure_cookie: bool,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            cookie_name: config.cookie_name.clone(),
            ttl: Duration::hours(config.ttl_hours),
            secure_cookie: config.secure_cookie,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn create(&self, admin: &Admin) -> Result<String, AppError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let session = SessionData {
            admin_id: admin.id,
            username: admin.username.clone(),
            role: admin.role.clone(),
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AppError::internal_error("session store lock poisoned"))?;
        sessions.retain(|_, s| s.expires_at > Utc::now());
        sessions.insert(token.clone(), session);

        Ok(token)
    }

    /// Look up a live session. Expired entries are dropped on sight.
    pub fn get(&self, token: &str) -> Result<Option<SessionData>, AppError> {
        let session = {
            let sessions = self
                .sessions
                .read()
                .map_err(|_| AppError::internal_error("session store lock poisoned"))?;
            sessions.get(token).cloned()
        };

        match session {
            Some(s) if s.expires_at > Utc::now() => Ok(Some(s)),
            Some(_) => {
                self.remove(token)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub fn remove(&self, token: &str) -> Result<(), AppError> {
        self.sessions
            .write()
            .map_err(|_| AppError::internal_error("session store lock poisoned"))?
            .remove(token);
        Ok(())
    }

    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Extractor gating admin routes. Rejects with 401 when the cookie is
/// missing, unknown or expired.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub admin_id: i64,
    pub username: String,
    pub role: String,
}

impl AdminSession {
    fn extract(req: &HttpRequest) -> Result<Self, AppError> {
        let store = req
            .app_data::<web::Data<SessionStore>>()
            .ok_or_else(|| AppError::internal_error("session store is not registered"))?;

        let token = req
            .cookie(store.cookie_name())
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let session = store
            .get(&token)?
            .ok_or_else(|| AppError::unauthorized("Session expired, please log in again"))?;

        Ok(AdminSession {
            token,
            admin_id: session.admin_id,
            username: session.username,
            role: session.role,
        })
    }
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
