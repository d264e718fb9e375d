//! Update Package Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fasttrack_app::packages::models::{PackageStatus, PositionUpdate};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

/// Update Package Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePackageRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Package Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageUpdatedResponse {
    /// Human-readable confirmation
    pub mensaje: String,
}

fn parse_estado(estado: Option<&str>) -> Result<Option<PackageStatus>, StatusError> {
    estado
        .map(str::parse)
        .transpose()
        .map_err(|_ignored| StatusError::bad_request().brief("Estado desconocido"))
}

/// Update Package Handler
///
/// Rewrites a package's position and status; when `estado` is omitted it
/// becomes `en_transito`.
#[endpoint(
    tags("paquetes"),
    summary = "Update Package Position",
    responses(
        (status_code = StatusCode::OK, description = "Package updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    codigo: PathParam<String>,
    json: JsonBody<UpdatePackageRequest>,
    depot: &mut Depot,
) -> Result<Json<PackageUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let estado = parse_estado(request.estado.as_deref())?;

    state
        .app
        .packages
        .update_position(
            &codigo.into_inner(),
            PositionUpdate {
                lat: request.lat,
                lng: request.lng,
                estado,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(PackageUpdatedResponse {
        mensaje: "Paquete actualizado".to_string(),
    }))
}
