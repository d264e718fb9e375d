//! Get Package Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fasttrack_app::packages::models::{Movement, PackageWithHistory};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MovementResponse {
    /// Recorded latitude
    pub lat: f64,

    /// Recorded longitude
    pub lng: f64,

    /// When the position was recorded
    pub fecha: String,
}

impl From<Movement> for MovementResponse {
    fn from(movement: Movement) -> Self {
        MovementResponse {
            lat: movement.lat,
            lng: movement.lng,
            fecha: movement.fecha.to_string(),
        }
    }
}

/// A package and its movement history, newest entry first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageDetailResponse {
    pub id: i64,
    pub codigo: String,
    pub lat: f64,
    pub lng: f64,
    pub estado: String,
    pub descripcion: Option<String>,
    pub creado: String,
    pub actualizado: String,
    pub historial: Vec<MovementResponse>,
}

impl From<PackageWithHistory> for PackageDetailResponse {
    fn from(detail: PackageWithHistory) -> Self {
        let package = detail.package;

        PackageDetailResponse {
            id: package.id,
            codigo: package.codigo,
            lat: package.lat,
            lng: package.lng,
            estado: package.estado.to_string(),
            descripcion: package.descripcion,
            creado: package.creado.to_string(),
            actualizado: package.actualizado.to_string(),
            historial: detail.historial.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Package Handler
///
/// Returns a package with its movement history.
#[endpoint(
    tags("paquetes"),
    summary = "Get Package",
    responses(
        (status_code = StatusCode::OK, description = "Package found"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    codigo: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PackageDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .packages
        .get_package(&codigo.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
