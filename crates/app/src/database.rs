//! Database connection management

use jiff::Timestamp;
use jiff_sqlx::ToSqlx;
use sqlx::{
    query,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};

const SCHEMA_PAQUETES_SQL: &str = include_str!("sql/schema_paquetes.sql");
const SCHEMA_HISTORIAL_SQL: &str = include_str!("sql/schema_historial.sql");
const SEED_PACKAGES_SQL: &str = include_str!("sql/seed_packages.sql");

/// Open or create the `SQLite` database file.
///
/// The pool is capped at a single connection: every request shares one
/// persistent handle and concurrency control is left to `SQLite` itself.
/// WAL journaling with relaxed synchronization trades strict durability
/// on crash for write throughput.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created.
pub async fn connect(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("cache_size", "-64000");

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Create the package and movement history tables if absent.
///
/// Idempotent; runs on every startup.
///
/// # Errors
///
/// Returns an error when the DDL cannot be executed.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(SCHEMA_PAQUETES_SQL).execute(pool).await?;
    query(SCHEMA_HISTORIAL_SQL).execute(pool).await?;

    Ok(())
}

/// Insert the example packages, skipping any codigo that already exists.
///
/// Seeding twice yields no duplicate rows and no error.
///
/// # Errors
///
/// Returns an error when the insert itself fails; conflicts on existing
/// codes are not errors.
pub async fn seed_example_packages(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(SEED_PACKAGES_SQL)
        .bind(Timestamp::now().to_sqlx())
        .execute(pool)
        .await?;

    Ok(())
}

/// In-memory database for tests; schema is not created here.
#[cfg(test)]
pub(crate) async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().in_memory(true))
        .await
}
