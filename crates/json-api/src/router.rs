//! App Router

use salvo::Router;

use crate::{healthcheck, packages};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("estadisticas").get(packages::stats::handler))
        .push(Router::with_path("paquetes").get(packages::index::handler))
        .push(
            Router::with_path("paquete")
                .post(packages::create::handler)
                .push(
                    Router::with_path("{codigo}")
                        .get(packages::get::handler)
                        .put(packages::update::handler)
                        .delete(packages::delete::handler),
                ),
        )
}
