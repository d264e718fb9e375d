//! Package Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use fasttrack_app::packages::models::PackageStats;

use crate::{extensions::*, state::State};

/// Aggregate package counts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total: i64,
    pub pendientes: i64,
    pub en_transito: i64,
    pub entregados: i64,
}

impl From<PackageStats> for StatsResponse {
    fn from(stats: PackageStats) -> Self {
        StatsResponse {
            total: stats.total,
            pendientes: stats.pendientes,
            en_transito: stats.en_transito,
            entregados: stats.entregados,
        }
    }
}

/// Package Stats Handler
///
/// Returns total and per-status package counts.
#[endpoint(tags("paquetes"), summary = "Package Statistics")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .packages
        .stats()
        .await
        .or_500("failed to compute package stats")?;

    Ok(Json(stats.into()))
}
