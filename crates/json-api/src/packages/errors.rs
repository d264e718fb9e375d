//! Package Errors

use salvo::http::StatusError;
use tracing::error;

use fasttrack_app::packages::PackagesServiceError;

pub(crate) fn into_status_error(error: PackagesServiceError) -> StatusError {
    match error {
        PackagesServiceError::EmptyCode => {
            StatusError::bad_request().brief("Código, lat y lng son obligatorios")
        }
        PackagesServiceError::CodeTooLong(max) => {
            StatusError::bad_request().brief(format!("El código supera los {max} caracteres"))
        }
        PackagesServiceError::InvalidLatitude => {
            StatusError::bad_request().brief("Latitud fuera de rango [-90, 90]")
        }
        PackagesServiceError::InvalidLongitude => {
            StatusError::bad_request().brief("Longitud fuera de rango [-180, 180]")
        }
        PackagesServiceError::InvalidData => {
            StatusError::bad_request().brief("Datos inválidos")
        }
        // The API contract maps duplicate codes to 400, not 409.
        PackagesServiceError::AlreadyExists => {
            StatusError::bad_request().brief("El código ya existe")
        }
        PackagesServiceError::NotFound => {
            StatusError::not_found().brief("Paquete no encontrado")
        }
        PackagesServiceError::Sql(source) => {
            error!("storage failure: {source}");

            StatusError::internal_server_error().brief("Error del servidor")
        }
    }
}
