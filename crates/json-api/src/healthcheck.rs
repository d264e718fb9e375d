//! FastTrack JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Number of tracked packages
    pub paquetes: i64,
}

/// Healthcheck handler
///
/// Returns service health status and the current package count.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let paquetes = state
        .app
        .packages
        .count_packages()
        .await
        .or_500("failed to count packages")?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        paquetes,
    }))
}
