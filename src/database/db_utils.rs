use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use dotenv::dotenv;
use std::env;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Idempotent table setup, run once at startup. SQLite creates the
/// database file on first connect so there is no separate migration step.
const SCHEMA_DDL: &str = "
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS blog (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    public BOOLEAN NOT NULL DEFAULT 0,
    author_id INTEGER NOT NULL REFERENCES user (id),
    created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS comment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES user (id),
    blog_id INTEGER NOT NULL REFERENCES blog (id),
    created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

/// Return a connection pool for the hosted database and make sure the
/// tables exist. Falls back to the `DATABASE_URL` environment variable
/// when no url is passed.
///
/// # Example
/// ```
/// let pool = connect_to_db(None);
/// ```
pub fn connect_to_db(database_url: Option<&str>) -> DbPool {
    dotenv().ok();

    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => env::var("DATABASE_URL")
            .expect("Environment variable: 'DATABASE_URL' not set"),
    };
    let manager = ConnectionManager::<SqliteConnection>::new(&database_url);
    let pool = Pool::builder()
        .build(manager)
        .unwrap_or_else(|err| panic!("Error connecting to {}: {}", database_url, err));

    initialize_schema(&pool.get().expect("No database connection available"));

    pool
}

pub fn initialize_schema(conn: &DbConn) {
    conn.batch_execute(SCHEMA_DDL)
        .expect("Failed to create database tables");
}
