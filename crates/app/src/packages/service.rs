//! Packages service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::packages::{
    errors::PackagesServiceError,
    models::{
        NewPackage, Package, PackageStats, PackageStatus, PackageWithHistory, PositionUpdate,
    },
    repository::PackagesRepository,
};

/// Longest accepted package code, in characters.
pub const MAX_CODE_LEN: usize = 50;

fn validate_code(codigo: &str) -> Result<(), PackagesServiceError> {
    if codigo.trim().is_empty() {
        return Err(PackagesServiceError::EmptyCode);
    }

    if codigo.chars().count() > MAX_CODE_LEN {
        return Err(PackagesServiceError::CodeTooLong(MAX_CODE_LEN));
    }

    Ok(())
}

fn validate_position(lat: f64, lng: f64) -> Result<(), PackagesServiceError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(PackagesServiceError::InvalidLatitude);
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(PackagesServiceError::InvalidLongitude);
    }

    Ok(())
}

#[derive(Clone)]
pub struct DefaultPackagesService {
    repository: Arc<dyn PackagesRepository>,
}

impl DefaultPackagesService {
    #[must_use]
    pub fn new(repository: Arc<dyn PackagesRepository>) -> Self {
        Self { repository }
    }

    /// Best-effort history append. Failures are logged and swallowed:
    /// the triggering insert/update has already committed and must not
    /// be rolled back or fail because of a missing history row.
    async fn record_movement(&self, paquete_id: i64, lat: f64, lng: f64) {
        if let Err(error) = self.repository.append_movement(paquete_id, lat, lng).await {
            warn!(paquete_id, "failed to append movement history: {error}");
        }
    }
}

#[async_trait]
impl PackagesService for DefaultPackagesService {
    async fn create_package(&self, package: NewPackage) -> Result<i64, PackagesServiceError> {
        validate_code(&package.codigo)?;
        validate_position(package.lat, package.lng)?;

        let (lat, lng) = (package.lat, package.lng);

        let id = self.repository.insert_package(package).await?;

        self.record_movement(id, lat, lng).await;

        Ok(id)
    }

    async fn list_packages(&self) -> Result<Vec<Package>, PackagesServiceError> {
        self.repository.list_packages().await.map_err(Into::into)
    }

    async fn get_package(&self, codigo: &str) -> Result<PackageWithHistory, PackagesServiceError> {
        let package = self.repository.get_package_by_code(codigo).await?;

        let historial = self.repository.list_movements(package.id).await?;

        Ok(PackageWithHistory { package, historial })
    }

    async fn update_position(
        &self,
        codigo: &str,
        update: PositionUpdate,
    ) -> Result<(), PackagesServiceError> {
        validate_position(update.lat, update.lng)?;

        let estado = update.estado.unwrap_or(PackageStatus::EnTransito);

        let rows = self
            .repository
            .update_position_by_code(codigo, update.lat, update.lng, estado)
            .await?;

        if rows == 0 {
            return Err(PackagesServiceError::NotFound);
        }

        match self.repository.find_package_id(codigo).await {
            Ok(Some(id)) => self.record_movement(id, update.lat, update.lng).await,
            // Package deleted between the update and the lookup.
            Ok(None) => {}
            Err(error) => {
                warn!(codigo, "failed to look up package for movement history: {error}");
            }
        }

        Ok(())
    }

    async fn delete_package(&self, codigo: &str) -> Result<(), PackagesServiceError> {
        let rows = self.repository.delete_package_by_code(codigo).await?;

        if rows == 0 {
            return Err(PackagesServiceError::NotFound);
        }

        Ok(())
    }

    async fn count_packages(&self) -> Result<i64, PackagesServiceError> {
        self.repository.count_packages().await.map_err(Into::into)
    }

    async fn stats(&self) -> Result<PackageStats, PackagesServiceError> {
        self.repository.package_stats().await.map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait PackagesService: Send + Sync {
    /// Validates and creates a package, then records its first movement
    /// history entry (best effort). Returns the assigned id.
    async fn create_package(&self, package: NewPackage) -> Result<i64, PackagesServiceError>;

    /// Every package, newest creation time first. No pagination.
    async fn list_packages(&self) -> Result<Vec<Package>, PackagesServiceError>;

    /// A single package with its full movement history, newest first.
    async fn get_package(&self, codigo: &str) -> Result<PackageWithHistory, PackagesServiceError>;

    /// Rewrites position and status; `estado` defaults to `en_transito`
    /// when omitted. Appends one history entry, best effort.
    async fn update_position(
        &self,
        codigo: &str,
        update: PositionUpdate,
    ) -> Result<(), PackagesServiceError>;

    /// Removes a package by codigo. Associated history is not removed.
    async fn delete_package(&self, codigo: &str) -> Result<(), PackagesServiceError>;

    /// Current number of tracked packages.
    async fn count_packages(&self) -> Result<i64, PackagesServiceError>;

    /// Total and per-status counts.
    async fn stats(&self) -> Result<PackageStats, PackagesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::packages::{
        errors::PackagesRepositoryError, models::Movement, repository::MockPackagesRepository,
    };

    use super::*;

    fn service(repository: MockPackagesRepository) -> DefaultPackagesService {
        DefaultPackagesService::new(Arc::new(repository))
    }

    fn new_package(codigo: &str) -> NewPackage {
        NewPackage {
            codigo: codigo.to_string(),
            lat: 14.6,
            lng: -90.5,
            estado: None,
            descripcion: None,
        }
    }

    fn make_package(id: i64, codigo: &str) -> Package {
        Package {
            id,
            codigo: codigo.to_string(),
            lat: 14.6,
            lng: -90.5,
            estado: PackageStatus::Pendiente,
            descripcion: None,
            creado: Timestamp::UNIX_EPOCH,
            actualizado: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_latitude() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package().never();
        repo.expect_append_movement().never();

        let result = service(repo)
            .create_package(NewPackage {
                lat: 91.0,
                ..new_package("PKG100")
            })
            .await;

        assert!(matches!(result, Err(PackagesServiceError::InvalidLatitude)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_longitude() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package().never();

        let result = service(repo)
            .create_package(NewPackage {
                lng: -180.5,
                ..new_package("PKG100")
            })
            .await;

        assert!(matches!(result, Err(PackagesServiceError::InvalidLongitude)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_empty_code() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package().never();

        let result = service(repo).create_package(new_package("   ")).await;

        assert!(matches!(result, Err(PackagesServiceError::EmptyCode)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_code() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package().never();

        let codigo = "X".repeat(MAX_CODE_LEN + 1);

        let result = service(repo).create_package(new_package(&codigo)).await;

        assert!(matches!(result, Err(PackagesServiceError::CodeTooLong(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_appends_history_with_assigned_id() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package()
            .once()
            .withf(|p| p.codigo == "PKG100")
            .return_once(|_| Ok(7));

        repo.expect_append_movement()
            .once()
            .withf(|id, lat, lng| {
                *id == 7 && (lat - 14.6).abs() < f64::EPSILON && (lng - -90.5).abs() < f64::EPSILON
            })
            .return_once(|_, _, _| Ok(()));

        let id = service(repo).create_package(new_package("PKG100")).await?;

        assert_eq!(id, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_swallows_history_failure() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package().once().return_once(|_| Ok(7));

        repo.expect_append_movement()
            .once()
            .return_once(|_, _, _| Err(PackagesRepositoryError::Sql(sqlx::Error::PoolClosed)));

        let id = service(repo).create_package(new_package("PKG100")).await?;

        assert_eq!(id, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_propagates_duplicate_code() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_insert_package()
            .once()
            .return_once(|_| Err(PackagesRepositoryError::AlreadyExists));

        repo.expect_append_movement().never();

        let result = service(repo).create_package(new_package("PKG100")).await;

        assert!(matches!(result, Err(PackagesServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_defaults_status_to_en_transito() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_update_position_by_code()
            .once()
            .withf(|codigo, _, _, estado| {
                codigo == "PKG100" && *estado == PackageStatus::EnTransito
            })
            .return_once(|_, _, _, _| Ok(1));

        repo.expect_find_package_id()
            .once()
            .return_once(|_| Ok(Some(7)));

        repo.expect_append_movement()
            .once()
            .withf(|id, _, _| *id == 7)
            .return_once(|_, _, _| Ok(()));

        service(repo)
            .update_position(
                "PKG100",
                PositionUpdate {
                    lat: 14.61,
                    lng: -90.51,
                    estado: None,
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_explicit_status() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_update_position_by_code()
            .once()
            .withf(|_, _, _, estado| *estado == PackageStatus::Entregado)
            .return_once(|_, _, _, _| Ok(1));

        repo.expect_find_package_id()
            .once()
            .return_once(|_| Ok(Some(7)));

        repo.expect_append_movement()
            .once()
            .return_once(|_, _, _| Ok(()));

        service(repo)
            .update_position(
                "PKG100",
                PositionUpdate {
                    lat: 14.61,
                    lng: -90.51,
                    estado: Some(PackageStatus::Entregado),
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_code_is_not_found() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_update_position_by_code()
            .once()
            .return_once(|_, _, _, _| Ok(0));

        repo.expect_find_package_id().never();
        repo.expect_append_movement().never();

        let result = service(repo)
            .update_position(
                "DOES_NOT_EXIST",
                PositionUpdate {
                    lat: 14.61,
                    lng: -90.51,
                    estado: None,
                },
            )
            .await;

        assert!(matches!(result, Err(PackagesServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_rejects_bad_position_before_storage() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_update_position_by_code().never();

        let result = service(repo)
            .update_position(
                "PKG100",
                PositionUpdate {
                    lat: -90.01,
                    lng: 0.0,
                    estado: None,
                },
            )
            .await;

        assert!(matches!(result, Err(PackagesServiceError::InvalidLatitude)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_swallows_history_lookup_failure() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_update_position_by_code()
            .once()
            .return_once(|_, _, _, _| Ok(1));

        repo.expect_find_package_id()
            .once()
            .return_once(|_| Err(PackagesRepositoryError::Sql(sqlx::Error::PoolClosed)));

        repo.expect_append_movement().never();

        service(repo)
            .update_position(
                "PKG100",
                PositionUpdate {
                    lat: 14.61,
                    lng: -90.51,
                    estado: None,
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_get_attaches_history() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_get_package_by_code()
            .once()
            .withf(|codigo| codigo == "PKG100")
            .return_once(|_| Ok(make_package(7, "PKG100")));

        repo.expect_list_movements()
            .once()
            .withf(|id| *id == 7)
            .return_once(|_| {
                Ok(vec![Movement {
                    id: 1,
                    paquete_id: 7,
                    lat: 14.6,
                    lng: -90.5,
                    fecha: Timestamp::UNIX_EPOCH,
                }])
            });

        let detail = service(repo).get_package("PKG100").await?;

        assert_eq!(detail.package.codigo, "PKG100");
        assert_eq!(detail.historial.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_code_is_not_found() -> TestResult {
        let mut repo = MockPackagesRepository::new();

        repo.expect_delete_package_by_code()
            .once()
            .return_once(|_| Ok(0));

        let result = service(repo).delete_package("DOES_NOT_EXIST").await;

        assert!(matches!(result, Err(PackagesServiceError::NotFound)));

        Ok(())
    }
}
