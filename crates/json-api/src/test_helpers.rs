//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use fasttrack_app::{
    context::AppContext,
    packages::{
        MockPackagesService,
        models::{Movement, Package, PackageStatus},
    },
};

use crate::state::State;

pub(crate) fn make_package(id: i64, codigo: &str) -> Package {
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

pub(crate) fn make_movement(paquete_id: i64, lat: f64, lng: f64) -> Movement {
    Movement {
        id: 1,
        paquete_id,
        lat,
        lng,
        fecha: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn state_with_packages(packages: MockPackagesService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        packages: Arc::new(packages),
    }))
}

pub(crate) fn packages_service(packages: MockPackagesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_packages(packages)))
            .push(route),
    )
}
