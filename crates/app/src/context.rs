//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database,
    packages::{DefaultPackagesService, PackagesService, SqlitePackagesRepository},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open database")]
    Database(#[source] sqlx::Error),

    #[error("failed to create schema")]
    Schema(#[source] sqlx::Error),

    #[error("failed to seed example data")]
    Seed(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub packages: Arc<dyn PackagesService>,
}

impl AppContext {
    /// Build application context from a `SQLite` database path.
    ///
    /// Opens (or creates) the database, ensures the schema exists and
    /// seeds the example packages.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or
    /// bootstrapped; callers treat this as a startup failure.
    pub async fn from_database_path(path: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(path).await.map_err(AppInitError::Database)?;

        database::ensure_schema(&pool)
            .await
            .map_err(AppInitError::Schema)?;

        database::seed_example_packages(&pool)
            .await
            .map_err(AppInitError::Seed)?;

        let repository = Arc::new(SqlitePackagesRepository::new(pool));

        Ok(Self {
            packages: Arc::new(DefaultPackagesService::new(repository)),
        })
    }
}
