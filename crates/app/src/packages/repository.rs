//! Packages Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::{Timestamp as SqlxTimestamp, ToSqlx};
use mockall::automock;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::packages::{
    errors::PackagesRepositoryError,
    models::{Movement, NewPackage, Package, PackageStats, PackageStatus},
};

const INSERT_PACKAGE_SQL: &str = include_str!("sql/insert_package.sql");
const LIST_PACKAGES_SQL: &str = include_str!("sql/list_packages.sql");
const GET_PACKAGE_BY_CODE_SQL: &str = include_str!("sql/get_package_by_code.sql");
const UPDATE_POSITION_BY_CODE_SQL: &str = include_str!("sql/update_position_by_code.sql");
const DELETE_PACKAGE_BY_CODE_SQL: &str = include_str!("sql/delete_package_by_code.sql");
const FIND_PACKAGE_ID_SQL: &str = include_str!("sql/find_package_id.sql");
const APPEND_MOVEMENT_SQL: &str = include_str!("sql/append_movement.sql");
const LIST_MOVEMENTS_SQL: &str = include_str!("sql/list_movements.sql");
const COUNT_PACKAGES_SQL: &str = include_str!("sql/count_packages.sql");
const PACKAGE_STATS_SQL: &str = include_str!("sql/package_stats.sql");

#[derive(Debug, Clone)]
pub struct SqlitePackagesRepository {
    pool: SqlitePool,
}

impl SqlitePackagesRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, SqliteRow> for Package {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let estado: String = row.try_get("estado")?;

        let estado: PackageStatus = estado.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "estado".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            codigo: row.try_get("codigo")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            estado,
            descripcion: row.try_get("descripcion")?,
            creado: row.try_get::<SqlxTimestamp, _>("creado")?.to_jiff(),
            actualizado: row.try_get::<SqlxTimestamp, _>("actualizado")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Movement {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            paquete_id: row.try_get("paquete_id")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            fecha: row.try_get::<SqlxTimestamp, _>("fecha")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for PackageStats {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            total: row.try_get("total")?,
            pendientes: row.try_get("pendientes")?,
            en_transito: row.try_get("en_transito")?,
            entregados: row.try_get("entregados")?,
        })
    }
}

#[async_trait]
impl PackagesRepository for SqlitePackagesRepository {
    async fn insert_package(&self, package: NewPackage) -> Result<i64, PackagesRepositoryError> {
        let now = Timestamp::now();

        query_scalar::<Sqlite, i64>(INSERT_PACKAGE_SQL)
            .bind(&package.codigo)
            .bind(package.lat)
            .bind(package.lng)
            .bind(package.estado.unwrap_or(PackageStatus::Pendiente).as_str())
            .bind(&package.descripcion)
            .bind(now.to_sqlx())
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_packages(&self) -> Result<Vec<Package>, PackagesRepositoryError> {
        query_as::<Sqlite, Package>(LIST_PACKAGES_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn get_package_by_code(&self, codigo: &str) -> Result<Package, PackagesRepositoryError> {
        query_as::<Sqlite, Package>(GET_PACKAGE_BY_CODE_SQL)
            .bind(codigo)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_position_by_code(
        &self,
        codigo: &str,
        lat: f64,
        lng: f64,
        estado: PackageStatus,
    ) -> Result<u64, PackagesRepositoryError> {
        let now = Timestamp::now();

        let result = query(UPDATE_POSITION_BY_CODE_SQL)
            .bind(codigo)
            .bind(lat)
            .bind(lng)
            .bind(estado.as_str())
            .bind(now.to_sqlx())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_package_by_code(&self, codigo: &str) -> Result<u64, PackagesRepositoryError> {
        let result = query(DELETE_PACKAGE_BY_CODE_SQL)
            .bind(codigo)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_package_id(&self, codigo: &str) -> Result<Option<i64>, PackagesRepositoryError> {
        query_scalar::<Sqlite, i64>(FIND_PACKAGE_ID_SQL)
            .bind(codigo)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn append_movement(
        &self,
        paquete_id: i64,
        lat: f64,
        lng: f64,
    ) -> Result<(), PackagesRepositoryError> {
        let now = Timestamp::now();

        query(APPEND_MOVEMENT_SQL)
            .bind(paquete_id)
            .bind(lat)
            .bind(lng)
            .bind(now.to_sqlx())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_movements(
        &self,
        paquete_id: i64,
    ) -> Result<Vec<Movement>, PackagesRepositoryError> {
        query_as::<Sqlite, Movement>(LIST_MOVEMENTS_SQL)
            .bind(paquete_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn count_packages(&self) -> Result<i64, PackagesRepositoryError> {
        query_scalar::<Sqlite, i64>(COUNT_PACKAGES_SQL)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn package_stats(&self) -> Result<PackageStats, PackagesRepositoryError> {
        query_as::<Sqlite, PackageStats>(PACKAGE_STATS_SQL)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait PackagesRepository: Send + Sync {
    /// Insert a package; `estado` defaults to `pendiente`. Returns the
    /// assigned surrogate id.
    async fn insert_package(&self, package: NewPackage) -> Result<i64, PackagesRepositoryError>;

    /// All packages, newest creation time first.
    async fn list_packages(&self) -> Result<Vec<Package>, PackagesRepositoryError>;

    /// Fetch a single package by its codigo.
    async fn get_package_by_code(&self, codigo: &str) -> Result<Package, PackagesRepositoryError>;

    /// Rewrite lat/lng/estado and refresh `actualizado`. Returns the
    /// number of rows affected; zero means no such codigo.
    async fn update_position_by_code(
        &self,
        codigo: &str,
        lat: f64,
        lng: f64,
        estado: PackageStatus,
    ) -> Result<u64, PackagesRepositoryError>;

    /// Delete a package by codigo. History rows are left in place.
    async fn delete_package_by_code(&self, codigo: &str) -> Result<u64, PackagesRepositoryError>;

    /// Surrogate id for a codigo, if present.
    async fn find_package_id(&self, codigo: &str) -> Result<Option<i64>, PackagesRepositoryError>;

    /// Append one movement history entry.
    async fn append_movement(
        &self,
        paquete_id: i64,
        lat: f64,
        lng: f64,
    ) -> Result<(), PackagesRepositoryError>;

    /// Movement history for a package, newest first.
    async fn list_movements(
        &self,
        paquete_id: i64,
    ) -> Result<Vec<Movement>, PackagesRepositoryError>;

    /// Total number of packages.
    async fn count_packages(&self) -> Result<i64, PackagesRepositoryError>;

    /// Total and per-status counts in a single query.
    async fn package_stats(&self) -> Result<PackageStats, PackagesRepositoryError>;
}
