use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::app::AppError;
use crate::database::db_utils::DbConn;
use crate::schema::comment;

use super::user::User;

#[derive(Debug, PartialEq, Queryable, Clone, Serialize)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub blog_id: i32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comment"]
struct CommentInsert {
    pub text: String,
    pub author_id: i32,
    pub blog_id: i32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl Comment {
    /** Creates a comment on the blog specified */
    pub fn new(
        conn: &DbConn,
        blog_id_in: i32,
        author: &User,
        text_in: &str,
    ) -> Result<Comment, AppError> {
        if text_in.is_empty() {
            return Err(AppError::BadRequest);
        }

        let time = Utc::now().naive_utc();
        let to_insert = CommentInsert {
            text: text_in.to_string(),
            author_id: author.id,
            blog_id: blog_id_in,
            created: time,
            updated: time,
        };

        diesel::insert_into(comment::table)
            .values(&to_insert)
            .execute(conn)?;
        let new_id: i32 = diesel::select(super::last_insert_rowid).first(conn)?;

        Ok(comment::table.find(new_id).first(conn)?)
    }

    /** Returns the comment with the id specified, if any */
    pub fn find_by_id(conn: &DbConn, comment_id: i32) -> Result<Option<Comment>, AppError> {
        Ok(comment::table
            .find(comment_id)
            .first::<Comment>(conn)
            .optional()?)
    }

    /** Returns all comments posted on a blog, newest first */
    pub fn find_by_blog(conn: &DbConn, blog_id_in: i32) -> Result<Vec<Comment>, AppError> {
        use crate::schema::comment::dsl::*;

        Ok(comment
            .filter(blog_id.eq(blog_id_in))
            .order((created.desc(), id.desc()))
            .load::<Comment>(conn)?)
    }

    /** Deletes a comment from the database */
    pub fn delete(conn: &DbConn, comment_id: i32) -> Result<(), AppError> {
        diesel::delete(comment::table.find(comment_id)).execute(conn)?;

        Ok(())
    }
}
