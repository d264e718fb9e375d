//! Package Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use fasttrack_app::packages::models::Package;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageResponse {
    /// Surrogate identity assigned by the store
    pub id: i64,

    /// Client-chosen unique tracking code
    pub codigo: String,

    /// Last known latitude
    pub lat: f64,

    /// Last known longitude
    pub lng: f64,

    /// Delivery status
    pub estado: String,

    /// Free-text description
    pub descripcion: Option<String>,

    /// Creation time
    pub creado: String,

    /// Last update time
    pub actualizado: String,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        PackageResponse {
            id: package.id,
            codigo: package.codigo,
            lat: package.lat,
            lng: package.lng,
            estado: package.estado.to_string(),
            descripcion: package.descripcion,
            creado: package.creado.to_string(),
            actualizado: package.actualizado.to_string(),
        }
    }
}

/// Package Index Handler
///
/// Returns every package, newest first.
#[endpoint(tags("paquetes"), summary = "List Packages")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<PackageResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let packages = state
        .app
        .packages
        .list_packages()
        .await
        .or_500("failed to list packages")?;

    Ok(Json(packages.into_iter().map(Into::into).collect()))
}
