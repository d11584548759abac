//! Visibility and ownership checks for blogs and comments.
//!
//! Every guarded lookup runs the same way: fetch the row (missing row is
//! `NotFound`), then apply the authorship rule, then the visibility rule.
//! Splitting "must be author" from "must be visible" lets list and detail
//! views apply only the visibility rule while edit/delete apply the
//! stricter authorship rule, without duplicating the existence check.

use crate::app::AppError;
use crate::database::db_utils::DbConn;
use crate::database::models::blog::{Blog, BlogWithAuthor};
use crate::database::models::comment::Comment;
use crate::database::models::user::User;

/// Whether `viewer` may see `blog` at all: public, or their own.
pub fn is_visible(blog: &BlogWithAuthor, viewer: Option<&User>) -> bool {
    blog.public || viewer.map_or(false, |u| u.id == blog.author_id)
}

/// The access decision for a fetched blog row. `check_author` demands a
/// logged-in viewer who is the author and runs before the public check;
/// anonymous viewers fail it unconditionally. `check_public` forbids
/// non-authors (and anonymous viewers) from private blogs.
fn authorize_blog(
    blog: &BlogWithAuthor,
    viewer: Option<&User>,
    check_author: bool,
    check_public: bool,
) -> Result<(), AppError> {
    let is_author = viewer.map_or(false, |u| u.id == blog.author_id);

    if check_author && !is_author {
        return Err(AppError::Forbidden);
    }
    if check_public && !blog.public && !is_author {
        return Err(AppError::Forbidden);
    }

    Ok(())
}

/// Guarded blog lookup: existence, then authorship, then visibility.
/// Returns the blog joined with its author's username on success.
pub fn resolve_blog(
    conn: &DbConn,
    viewer: Option<&User>,
    blog_id: i32,
    check_author: bool,
    check_public: bool,
) -> Result<BlogWithAuthor, AppError> {
    let blog = Blog::get_with_author(conn, blog_id)?.ok_or(AppError::NotFound)?;
    authorize_blog(&blog, viewer, check_author, check_public)?;

    Ok(blog)
}

/// Guarded comment lookup. Deletability belongs to the comment's own
/// author; the parent blog's author gets no special rights here.
pub fn resolve_comment(
    conn: &DbConn,
    viewer: Option<&User>,
    comment_id: i32,
    check_author: bool,
) -> Result<Comment, AppError> {
    let comment = Comment::find_by_id(conn, comment_id)?.ok_or(AppError::NotFound)?;

    if check_author && viewer.map_or(true, |u| u.id != comment.author_id) {
        return Err(AppError::Forbidden);
    }

    Ok(comment)
}

/// All blogs visible to `viewer`, most recently updated first, optionally
/// filtered by a substring match against title or body. The rows are
/// fetched once and post-filtered, so the result is a plain materialized
/// list, not a live cursor.
pub fn visible_blogs(
    conn: &DbConn,
    viewer: Option<&User>,
    search: Option<&str>,
) -> Result<Vec<BlogWithAuthor>, AppError> {
    let rows = Blog::list_with_authors(conn, search)?;

    Ok(rows
        .into_iter()
        .filter(|blog| is_visible(blog, viewer))
        .collect())
}

/// All comments on a blog. Comments carry no privacy flag of their own, so
/// no visibility filtering happens at this layer.
pub fn blog_comments(conn: &DbConn, blog_id: i32) -> Result<Vec<Comment>, AppError> {
    Comment::find_by_blog(conn, blog_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db_utils::test_support::TestDb;
    use chrono::NaiveDate;
    use sha256::digest;

    fn some_user(user_id: i32) -> User {
        User {
            id: user_id,
            username: format!("user{}", user_id),
            email: format!("user{}@example.com", user_id),
            password: digest("pw"),
        }
    }

    fn some_blog(author_id: i32, public: bool) -> BlogWithAuthor {
        let time = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        BlogWithAuthor {
            id: 1,
            title: String::from("A title"),
            body: String::from("A body"),
            public,
            author_id,
            created: time,
            updated: time,
            username: format!("user{}", author_id),
        }
    }

    #[test]
    fn test_private_blog_hidden_from_others() {
        let blog = some_blog(1, false);

        assert!(authorize_blog(&blog, None, false, true).is_err());
        assert!(authorize_blog(&blog, Some(&some_user(2)), false, true).is_err());
        assert!(authorize_blog(&blog, Some(&some_user(1)), false, true).is_ok());
    }

    #[test]
    fn test_public_blog_visible_to_everyone() {
        let blog = some_blog(1, true);

        assert!(authorize_blog(&blog, None, false, true).is_ok());
        assert!(authorize_blog(&blog, Some(&some_user(2)), false, true).is_ok());
        assert!(authorize_blog(&blog, Some(&some_user(1)), false, true).is_ok());
    }

    #[test]
    fn test_author_check_rejects_anonymous_and_non_authors() {
        // The author requirement applies even to public blogs and never
        // lets anonymous viewers through.
        let blog = some_blog(1, true);

        assert!(authorize_blog(&blog, None, true, true).is_err());
        assert!(authorize_blog(&blog, Some(&some_user(2)), true, true).is_err());
        assert!(authorize_blog(&blog, Some(&some_user(1)), true, true).is_ok());
    }

    #[test]
    fn test_visibility_helper() {
        assert!(is_visible(&some_blog(1, true), None));
        assert!(!is_visible(&some_blog(1, false), None));
        assert!(is_visible(&some_blog(1, false), Some(&some_user(1))));
        assert!(!is_visible(&some_blog(1, false), Some(&some_user(2))));
    }

    #[actix_rt::test]
    async fn test_resolve_blog_against_database() {
        let db = TestDb::new();
        let conn = db.conn();
        let alice = User::new(&conn, "alice", "alice@example.com", &digest("pw")).unwrap();
        let bob = User::new(&conn, "bob", "bob@example.com", &digest("pw")).unwrap();
        let hidden = Blog::new(&conn, &alice, "Hi there", "World", false).unwrap();

        assert!(matches!(
            resolve_blog(&conn, None, hidden.id, false, true),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            resolve_blog(&conn, Some(&bob), hidden.id, false, true),
            Err(AppError::Forbidden)
        ));

        let resolved = resolve_blog(&conn, Some(&alice), hidden.id, false, true).unwrap();
        assert_eq!(resolved.title, "Hi there");
        assert_eq!(resolved.username, "alice");

        assert!(matches!(
            resolve_blog(&conn, Some(&alice), hidden.id + 100, false, true),
            Err(AppError::NotFound)
        ));
    }

    #[actix_rt::test]
    async fn test_resolve_comment_authorship_asymmetry() {
        let db = TestDb::new();
        let conn = db.conn();
        let alice = User::new(&conn, "alice", "alice@example.com", &digest("pw")).unwrap();
        let bob = User::new(&conn, "bob", "bob@example.com", &digest("pw")).unwrap();
        let blog = Blog::new(&conn, &alice, "Hi there", "World", true).unwrap();
        let comment = Comment::new(&conn, blog.id, &bob, "bob was here").unwrap();

        // The blog's author has no say over bob's comment.
        assert!(matches!(
            resolve_comment(&conn, Some(&alice), comment.id, true),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            resolve_comment(&conn, None, comment.id, true),
            Err(AppError::Forbidden)
        ));
        assert!(resolve_comment(&conn, Some(&bob), comment.id, true).is_ok());
        assert!(matches!(
            resolve_comment(&conn, Some(&bob), comment.id + 100, true),
            Err(AppError::NotFound)
        ));
    }

    #[actix_rt::test]
    async fn test_visible_blogs_filters_and_orders() {
        let db = TestDb::new();
        let conn = db.conn();
        let alice = User::new(&conn, "alice", "alice@example.com", &digest("pw")).unwrap();
        let bob = User::new(&conn, "bob", "bob@example.com", &digest("pw")).unwrap();
        Blog::new(&conn, &alice, "alice public", "shared words", true).unwrap();
        Blog::new(&conn, &alice, "alice secret", "private words", false).unwrap();
        Blog::new(&conn, &bob, "bob secret", "private words", false).unwrap();

        let anonymous = visible_blogs(&conn, None, None).unwrap();
        assert_eq!(anonymous.len(), 1);
        assert_eq!(anonymous[0].title, "alice public");

        let as_alice = visible_blogs(&conn, Some(&alice), None).unwrap();
        let titles: Vec<&str> = as_alice.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"alice public"));
        assert!(titles.contains(&"alice secret"));

        let as_bob = visible_blogs(&conn, Some(&bob), None).unwrap();
        let titles: Vec<&str> = as_bob.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["bob secret", "alice public"]);

        let searched = visible_blogs(&conn, Some(&alice), Some("secret")).unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].title, "alice secret");
    }

    #[actix_rt::test]
    async fn test_search_matches_wildcard_characters_literally() {
        let db = TestDb::new();
        let conn = db.conn();
        let alice = User::new(&conn, "alice", "alice@example.com", &digest("pw")).unwrap();
        Blog::new(&conn, &alice, "sale 100% off", "everything must go", true).unwrap();
        Blog::new(&conn, &alice, "sale 100x off", "nothing must go", true).unwrap();
        Blog::new(&conn, &alice, "under_score", "plain words", true).unwrap();

        let searched = visible_blogs(&conn, None, Some("100%")).unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].title, "sale 100% off");

        let searched = visible_blogs(&conn, None, Some("under_")).unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].title, "under_score");
    }
}
