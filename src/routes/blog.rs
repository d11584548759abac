use actix_session::Session;
use actix_web::{
    get, post,
    web::{Data, Form, Query},
    HttpRequest, HttpResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    app::{AppError, AppState},
    auth::{current_user, require_user},
    database::models::blog::Blog,
    forms::BlogForm,
    guard,
};

use super::redirect_to;

#[derive(Deserialize)]
pub struct SearchQuery {
    search: Option<String>,
}

/// Pipe for listing the blogs visible to the caller, most recently
/// updated first
/// - url: `{domain}/?search={term}`
///
/// # Response
/// ## Ok
/// - json list of blogs with their author usernames; private blogs of
///   other users are never included
#[get("/")]
pub async fn index(
    query: Query<SearchQuery>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let viewer = current_user(&session, &conn)?;

    let blogs = guard::visible_blogs(&conn, viewer.as_ref(), query.search.as_deref())?;

    Ok(HttpResponse::Ok().json(blogs))
}

/// Pipe for creating a blog for the logged-in user
/// - url: `{domain}/create`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `title`, `body` and optional `public`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/`
/// ## Error
/// - Unauthorized
/// - Validation failed
#[post("/create")]
pub async fn create(
    form: Form<BlogForm>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    form.validate()?;

    Blog::new(&conn, &user, &form.title, &form.body, form.public)?;

    Ok(redirect_to("/"))
}

/// Pipe for fetching a blog for the update form, author only
/// - url: `{domain}/{blog_id}/update`
#[get("/{blog_id}/update")]
pub async fn update_form(
    req: HttpRequest,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    let blog_id = req.match_info().query("blog_id").parse::<i32>()?;

    let blog = guard::resolve_blog(&conn, Some(&user), blog_id, true, true)?;

    Ok(HttpResponse::Ok().json(blog))
}

/// Pipe for updating a blog, author only
/// - url: `{domain}/{blog_id}/update`
///
/// # HTTP request requirements
/// ## body
/// - url-encoded form with `title`, `body` and optional `public`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/`
/// ## Error
/// - Unauthorized
/// - Not found
/// - Forbidden when the caller is not the author
/// - Validation failed
#[post("/{blog_id}/update")]
pub async fn update(
    req: HttpRequest,
    form: Form<BlogForm>,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    form.validate()?;
    let blog_id = req.match_info().query("blog_id").parse::<i32>()?;

    let blog = guard::resolve_blog(&conn, Some(&user), blog_id, true, true)?;
    Blog::update(&conn, blog.id, &form.title, &form.body, form.public)?;

    Ok(redirect_to("/"))
}

/// Pipe for showing one blog and its comments
/// - url: `{domain}/{blog_id}/detail`
///
/// # Response
/// ## Ok
/// - json object with the blog and its comments
/// ## Error
/// - Not found
/// - Forbidden when the blog is private and the caller is not its author
#[get("/{blog_id}/detail")]
pub async fn detail(
    req: HttpRequest,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let viewer = current_user(&session, &conn)?;
    let blog_id = req.match_info().query("blog_id").parse::<i32>()?;

    let blog = guard::resolve_blog(&conn, viewer.as_ref(), blog_id, false, true)?;
    let comments = guard::blog_comments(&conn, blog_id)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "blog": blog,
        "comments": comments,
    })))
}

/// Pipe for deleting a blog and its comments, author only
/// - url: `{domain}/{blog_id}/delete`
///
/// # Response
/// ## Ok
/// - 303 redirect to `/`
/// ## Error
/// - Unauthorized
/// - Not found
/// - Forbidden when the caller is not the author
#[post("/{blog_id}/delete")]
pub async fn delete_blog(
    req: HttpRequest,
    session: Session,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let conn = app_state.conn()?;
    let user = require_user(&session, &conn)?;
    let blog_id = req.match_info().query("blog_id").parse::<i32>()?;

    let blog = guard::resolve_blog(&conn, Some(&user), blog_id, true, true)?;
    Blog::delete_by_id(&conn, blog.id)?;

    Ok(redirect_to("/"))
}
