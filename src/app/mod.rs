use std::{fmt::Display, num::ParseIntError, sync::Arc};

use actix_session::{
    storage::CookieSessionStore, SessionGetError, SessionInsertError, SessionMiddleware,
};
use actix_web::{cookie::Key, HttpResponse, ResponseError};
use rand::Rng;
use validator::ValidationErrors;

use crate::database::db_utils::{self, DbConn, DbPool};

/** Used for storing the database connection when handling requests */
pub struct AppState {
    pub db_pool: Arc<DbPool>,
}

impl AppState {
    /// Builds the shared state from `database_url`, falling back to the
    /// `DATABASE_URL` environment variable when `None` is passed.
    pub fn new(database_url: Option<&str>) -> AppState {
        AppState {
            db_pool: Arc::new(db_utils::connect_to_db(database_url)),
        }
    }

    /// Checks out a pooled connection for the current request.
    pub fn conn(&self) -> Result<DbConn, AppError> {
        self.db_pool.get().map_err(|err| {
            log::error!("database pool exhausted: {}", err);
            AppError::InternalServerError
        })
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            db_pool: self.db_pool.clone(),
        }
    }
}

/// Cookie-backed session middleware holding the logged-in `user_id`.
/// The cookie is the only session transport; there is no server-side store.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

/// Signing key for the session cookie, taken from `SECRET_KEY` when it is
/// long enough, otherwise freshly generated (sessions then die with the
/// process).
pub fn session_key() -> Key {
    match std::env::var("SECRET_KEY") {
        Ok(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        Ok(_) => {
            log::warn!("SECRET_KEY is shorter than 64 bytes, using a generated key");
            generated_key()
        }
        Err(_) => generated_key(),
    }
}

fn generated_key() -> Key {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill(&mut bytes[..]);
    Key::from(&bytes)
}

/** Holds the errors we will use during request processing */
#[derive(Debug)]
pub enum AppError {
    /// The requested blog or comment does not exist.
    NotFound,
    /// The current identity lacks the required ownership or visibility.
    Forbidden,
    /// No identity, or the submitted credentials did not match.
    Unauthorized(String),
    /// Form input violated field rules; carries the per-field messages.
    ValidationFailed(ValidationErrors),
    /// Username or email already taken at registration.
    Duplicate(String),
    BadRequest,
    InternalServerError,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound => f.write_str("Not found"),
            AppError::Forbidden => f.write_str("Forbidden"),
            AppError::Unauthorized(msg) => f.write_str(msg),
            AppError::ValidationFailed(_) => f.write_str("Validation failed"),
            AppError::Duplicate(msg) => f.write_str(msg),
            AppError::BadRequest => f.write_str("Bad request"),
            AppError::InternalServerError => f.write_str("Internal server error"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AppError::NotFound => actix_web::http::StatusCode::NOT_FOUND,
            AppError::Forbidden => actix_web::http::StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            AppError::ValidationFailed(_) => actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Duplicate(_) => actix_web::http::StatusCode::CONFLICT,
            AppError::BadRequest => actix_web::http::StatusCode::BAD_REQUEST,
            AppError::InternalServerError => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::ValidationFailed(errors) => {
                builder.json(serde_json::json!({ "errors": errors }))
            }
            _ => builder.json(serde_json::json!({ "error": self.to_string() })),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => AppError::NotFound,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => AppError::Duplicate(info.message().to_string()),
            diesel::result::Error::QueryBuilderError(_) => AppError::BadRequest,
            diesel::result::Error::DeserializationError(_) => AppError::BadRequest,
            _ => AppError::InternalServerError,
        }
    }
}

impl From<ParseIntError> for AppError {
    fn from(_: ParseIntError) -> Self {
        Self::BadRequest
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationFailed(errors)
    }
}

impl From<SessionGetError> for AppError {
    fn from(_: SessionGetError) -> Self {
        AppError::InternalServerError
    }
}

impl From<SessionInsertError> for AppError {
    fn from(_: SessionInsertError) -> Self {
        AppError::InternalServerError
    }
}

impl std::error::Error for AppError {}
