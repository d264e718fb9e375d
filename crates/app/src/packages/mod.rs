//! Packages

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::{PackagesRepositoryError, PackagesServiceError};
pub use repository::{MockPackagesRepository, PackagesRepository, SqlitePackagesRepository};
pub use service::*;
