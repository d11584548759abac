use actix_session::Session;
use actix_web::{
    get, post,
    web::{Data, Form},
    HttpResponse,
};
use sha256::digest;
use validator::Validate;

use crate::{
    app::{AppError, AppState},
    auth::USER_ID_KEY,
    database::models::user::User,
    forms::{ForgotForm, LoginForm, RegisterForm},
};

use super::redirect_to;

/// Pipe for registering a new user
/// - url: `{domain}/auth/register`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `username`, `email`, `password` and `confirm`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/auth/login`
/// ## Error
/// - Validation failed (per-field messages in the body)
/// - Conflict when the username or email is already registered
#[post("/auth/register")]
pub async fn register(
    form: Form<RegisterForm>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    form.validate()?;
    let conn = app_state.conn()?;

    if User::find_by_username(&conn, &form.username)?.is_some() {
        return Err(AppError::Duplicate(format!(
            "User {} is already registered.",
            form.username
        )));
    }
    if User::find_by_email(&conn, &form.email)?.is_some() {
        return Err(AppError::Duplicate(format!(
            "Email {} is already registered.",
            form.email
        )));
    }

    User::new(
        &conn,
        &form.username,
        &form.email,
        &digest(form.password.as_str()),
    )?;

    Ok(redirect_to("/auth/login"))
}

/// Pipe for logging in a registered user
/// - url: `{domain}/auth/login`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `username` and `password`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/`, session cookie bound to the user id
/// ## Error
/// - Unauthorized with a generic incorrect-username or incorrect-password
///   message
#[post("/auth/login")]
pub async fn login(
    form: Form<LoginForm>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    form.validate()?;
    let conn = app_state.conn()?;

    let user = User::find_by_username(&conn, &form.username)?
        .ok_or_else(|| AppError::Unauthorized(String::from("Incorrect username.")))?;
    if user.password != digest(form.password.as_str()) {
        return Err(AppError::Unauthorized(String::from("Incorrect password.")));
    }

    // Drop whatever session state came with the request before binding the
    // new identity, so a pre-login cookie cannot be fixated.
    session.clear();
    session.renew();
    session.insert(USER_ID_KEY, user.id)?;

    Ok(redirect_to("/"))
}

/// Pipe for starting a password recovery
/// - url: `{domain}/auth/forgot`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `email`
///
/// # Response
/// ## Ok
/// - the same non-committal message whether or not the email is
///   registered, so the endpoint cannot be used to probe for accounts;
///   on a match the session is cleared and the recovery notification
///   (stubbed) is logged
#[post("/auth/forgot")]
pub async fn forgot(
    form: Form<ForgotForm>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    form.validate()?;
    let conn = app_state.conn()?;

    if let Some(user) = User::find_by_email(&conn, &form.email)? {
        session.purge();
        log::info!("sending recovery email for user {}", user.id);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "If that email is registered, a recovery message has been sent."
    })))
}

/// Pipe for logging out
/// - url: `{domain}/auth/logout`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/`, session removed
#[get("/auth/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    redirect_to("/")
}
