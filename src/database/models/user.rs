use diesel::prelude::*;

use crate::{app::AppError, database::db_utils::DbConn, schema::user};

#[derive(Debug, Queryable, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    ///SHA256 of the password
    pub password: String,
}

#[derive(Insertable)]
#[table_name = "user"]
struct UserInsert {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Pushes a new user record in the database and returns it. The
    /// password must already be hashed; this layer never sees plaintext.
    ///
    /// # Example
    /// ```
    /// let result = User::new(&conn, "username", "user@example.com", &digest("password"));
    /// ```
    pub fn new(
        conn: &DbConn,
        uname: &str,
        mail: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        if uname.is_empty() || mail.is_empty() || password_hash.is_empty() {
            return Err(AppError::BadRequest);
        }

        let to_insert = UserInsert {
            username: uname.to_string(),
            email: mail.to_string(),
            password: password_hash.to_string(),
        };

        diesel::insert_into(user::table)
            .values(&to_insert)
            .execute(conn)?;
        let new_id: i32 = diesel::select(super::last_insert_rowid).first(conn)?;

        Ok(user::table.find(new_id).first(conn)?)
    }

    /** Returns the user with the id specified, if any */
    pub fn find_by_id(conn: &DbConn, user_id: i32) -> Result<Option<User>, AppError> {
        use crate::schema::user::dsl::*;

        Ok(user.filter(id.eq(user_id)).first::<User>(conn).optional()?)
    }

    /** Returns the user with the username specified, if any */
    pub fn find_by_username(conn: &DbConn, uname: &str) -> Result<Option<User>, AppError> {
        use crate::schema::user::dsl::*;

        Ok(user
            .filter(username.eq(uname))
            .first::<User>(conn)
            .optional()?)
    }

    /** Returns the user with the email specified, if any */
    pub fn find_by_email(conn: &DbConn, mail: &str) -> Result<Option<User>, AppError> {
        use crate::schema::user::dsl::*;

        Ok(user.filter(email.eq(mail)).first::<User>(conn).optional()?)
    }
}
