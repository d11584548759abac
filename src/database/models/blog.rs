use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::app::AppError;
use crate::database::db_utils::DbConn;
use crate::schema::{blog, comment, user};

use super::user::User;

#[derive(Debug, PartialEq, Queryable, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub public: bool,
    pub author_id: i32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

/// Blog row joined with the author's username, the shape handed out for
/// display.
#[derive(Debug, PartialEq, Queryable, Clone, Serialize)]
pub struct BlogWithAuthor {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub public: bool,
    pub author_id: i32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub username: String,
}

#[derive(Insertable)]
#[table_name = "blog"]
struct BlogInsert {
    pub title: String,
    pub body: String,
    pub public: bool,
    pub author_id: i32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl Blog {
    /// Inserts a blog for `author`. The author is fixed here and never
    /// changes afterwards.
    pub fn new(
        conn: &DbConn,
        author: &User,
        title_in: &str,
        body_in: &str,
        public_in: bool,
    ) -> Result<Blog, AppError> {
        if title_in.is_empty() || body_in.is_empty() {
            return Err(AppError::BadRequest);
        }

        let time = Utc::now().naive_utc();
        let to_insert = BlogInsert {
            title: title_in.to_string(),
            body: body_in.to_string(),
            public: public_in,
            author_id: author.id,
            created: time,
            updated: time,
        };

        diesel::insert_into(blog::table)
            .values(&to_insert)
            .execute(conn)?;
        let new_id: i32 = diesel::select(super::last_insert_rowid).first(conn)?;

        Ok(blog::table.find(new_id).first(conn)?)
    }

    /** Returns the blog with its author's username joined in, if any */
    pub fn get_with_author(
        conn: &DbConn,
        blog_id: i32,
    ) -> Result<Option<BlogWithAuthor>, AppError> {
        Ok(blog::table
            .inner_join(user::table)
            .select((
                blog::id,
                blog::title,
                blog::body,
                blog::public,
                blog::author_id,
                blog::created,
                blog::updated,
                user::username,
            ))
            .filter(blog::id.eq(blog_id))
            .first::<BlogWithAuthor>(conn)
            .optional()?)
    }

    /// All blogs joined with their authors, most recently updated first,
    /// optionally narrowed to a substring match against title or body.
    /// Visibility is not applied here; that is the guard's job.
    pub fn list_with_authors(
        conn: &DbConn,
        search: Option<&str>,
    ) -> Result<Vec<BlogWithAuthor>, AppError> {
        let mut query = blog::table
            .inner_join(user::table)
            .select((
                blog::id,
                blog::title,
                blog::body,
                blog::public,
                blog::author_id,
                blog::created,
                blog::updated,
                user::username,
            ))
            .order(blog::updated.desc())
            .into_boxed();

        if let Some(term) = search {
            // `%` and `_` in the term match themselves, not as wildcards.
            let escaped = term
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            let pattern = format!("%{}%", escaped);
            query = query.filter(
                blog::title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(blog::body.like(pattern).escape('\\')),
            );
        }

        Ok(query.load::<BlogWithAuthor>(conn)?)
    }

    /// Applies the submitted title/body/public values and bumps `updated`.
    pub fn update(
        conn: &DbConn,
        blog_id: i32,
        title_in: &str,
        body_in: &str,
        public_in: bool,
    ) -> Result<(), AppError> {
        diesel::update(blog::table.find(blog_id))
            .set((
                blog::title.eq(title_in),
                blog::body.eq(body_in),
                blog::public.eq(public_in),
                blog::updated.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        Ok(())
    }

    /** Deletes a blog together with its comments */
    pub fn delete_by_id(conn: &DbConn, blog_id_in: i32) -> Result<(), AppError> {
        diesel::delete(comment::table.filter(comment::blog_id.eq(blog_id_in)))
            .execute(conn)?;
        diesel::delete(blog::table.find(blog_id_in)).execute(conn)?;

        Ok(())
    }
}
