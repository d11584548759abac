use actix_session::Session;
use actix_web::{
    post,
    web::{Data, Form},
    HttpRequest, HttpResponse,
};
use validator::Validate;

use crate::{
    app::{AppError, AppState},
    auth::require_user,
    database::models::comment::Comment,
    forms::CommentForm,
    guard,
};

use super::redirect_to;

/// Pipe for commenting on a blog
/// - url: `{domain}/{blog_id}/comment`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `text`
///
/// # Response
/// ## Ok
/// - 303 redirect to the blog's detail page
/// ## Error
/// - Unauthorized
/// - Not found
/// - Forbidden when the blog is private and the caller is not its author
/// - Validation failed
#[post("/{blog_id}/comment")]
pub async fn create_comment(
    req: HttpRequest,
    form: Form<CommentForm>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    form.validate()?;
    let blog_id = req.match_info().query("blog_id").parse::<i32>()?;

    // The commenter must be able to see the blog, nothing more.
    let blog = guard::resolve_blog(&conn, Some(&user), blog_id, false, true)?;
    Comment::new(&conn, blog.id, &user, &form.text)?;

    Ok(redirect_to(&format!("/{}/detail", blog.id)))
}

/// Pipe for deleting a comment, its author only
/// - url: `{domain}/{comment_id}/comment_delete`
///
/// # Response
/// ## Ok
/// - 303 redirect to the parent blog's detail page
/// ## Error
/// - Unauthorized
/// - Not found
/// - Forbidden when the caller did not write the comment (the blog's
///   author included)
#[post("/{comment_id}/comment_delete")]
pub async fn delete_comment(
    req: HttpRequest,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    let comment_id = req.match_info().query("comment_id").parse::<i32>()?;

    let comment = guard::resolve_comment(&conn, Some(&user), comment_id, true)?;
    Comment::delete(&conn, comment.id)?;

    Ok(redirect_to(&format!("/{}/detail", comment.blog_id)))
}
