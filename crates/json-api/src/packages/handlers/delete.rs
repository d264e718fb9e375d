//! Delete Package Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

/// Package Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageDeletedResponse {
    /// Human-readable confirmation
    pub mensaje: String,
}

/// Delete Package Handler
///
/// Removes a package by codigo. Its movement history is left in place.
#[endpoint(
    tags("paquetes"),
    summary = "Delete Package",
    responses(
        (status_code = StatusCode::OK, description = "Package deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    codigo: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PackageDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .packages
        .delete_package(&codigo.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PackageDeletedResponse {
        mensaje: "Paquete eliminado".to_string(),
    }))
}
