//! Create Package Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fasttrack_app::packages::models::{NewPackage, PackageStatus};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

/// Create Package Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePackageRequest {
    pub codigo: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Package Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageCreatedResponse {
    /// Human-readable confirmation
    pub mensaje: String,

    /// Assigned package id
    pub id: i64,
}

fn parse_estado(estado: Option<&str>) -> Result<Option<PackageStatus>, StatusError> {
    estado
        .map(str::parse)
        .transpose()
        .map_err(|_ignored| StatusError::bad_request().brief("Estado desconocido"))
}

/// Create Package Handler
#[endpoint(
    tags("paquetes"),
    summary = "Create Package",
    responses(
        (status_code = StatusCode::OK, description = "Package created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields, or duplicate code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePackageRequest>,
    depot: &mut Depot,
) -> Result<Json<PackageCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let estado = parse_estado(request.estado.as_deref())?;

    let id = state
        .app
        .packages
        .create_package(NewPackage {
            codigo: request.codigo,
            lat: request.lat,
            lng: request.lng,
            estado,
            descripcion: request.descripcion,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(PackageCreatedResponse {
        mensaje: "Paquete agregado".to_string(),
        id,
    }))
}
