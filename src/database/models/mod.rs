pub mod blog;
pub mod comment;
pub mod user;

// SQLite has no RETURNING through diesel 1.4, so inserts fetch the fresh
// row id with last_insert_rowid() on the same connection.
no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::Integer,
    "Represents the SQLite last_insert_rowid() function"
);
