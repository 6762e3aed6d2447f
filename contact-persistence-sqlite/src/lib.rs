pub mod contacts;

pub use contacts::SqliteContactRepository;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Opens the contact database named by the `CONTACT_DB` env var. The store is
/// owned by this application, so a missing file is created rather than
/// treated as an error.
pub fn create_contact_db_pool() -> Pool<Sqlite> {
    let db_path = std::env::var("CONTACT_DB").expect("CONTACT_DB env var not set");

    let conn_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(conn_options)
}
