pub mod auth;
pub mod blog;
pub mod comment;

use actix_web::{http::header, HttpResponse};

/// 303 with a Location header, the post/redirect/get flow every successful
/// mutation finishes with.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
