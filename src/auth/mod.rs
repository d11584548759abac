use actix_session::Session;

use crate::app::AppError;
use crate::database::db_utils::DbConn;
use crate::database::models::user::User;

/// Session key holding the id of the logged-in user.
pub const USER_ID_KEY: &str = "user_id";

/// Resolves the session credential to a user record, once per request.
/// No stored id means anonymous; a stored id that no longer matches any
/// user (deleted account) is treated as anonymous as well, never as an
/// error. Handlers call this at the top and pass the result down.
pub fn current_user(session: &Session, conn: &DbConn) -> Result<Option<User>, AppError> {
    match session.get::<i32>(USER_ID_KEY)? {
        Some(user_id) => Ok(User::find_by_id(conn, user_id)?),
        None => Ok(None),
    }
}

/// Precondition for operations that need a logged-in user, the explicit
/// counterpart of a `login_required` wrapper.
pub fn require_user(session: &Session, conn: &DbConn) -> Result<User, AppError> {
    current_user(session, conn)?
        .ok_or_else(|| AppError::Unauthorized(String::from("Login required.")))
}
