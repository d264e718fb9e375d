//! Package Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery status of a package.
///
/// The transition graph is deliberately unconstrained: any status may be
/// set from any other, including back to `Pendiente`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Pendiente,
    EnTransito,
    Entregado,
}

impl PackageStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::EnTransito => "en_transito",
            Self::Entregado => "entregado",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown package status: {0}")]
pub struct UnknownStatus(String);

impl FromStr for PackageStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pendiente),
            "en_transito" => Ok(Self::EnTransito),
            "entregado" => Ok(Self::Entregado),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Package Model
#[derive(Debug, Clone)]
pub struct Package {
    pub id: i64,
    pub codigo: String,
    pub lat: f64,
    pub lng: f64,
    pub estado: PackageStatus,
    pub descripcion: Option<String>,
    pub creado: Timestamp,
    pub actualizado: Timestamp,
}

/// New Package Model
#[derive(Debug, Clone)]
pub struct NewPackage {
    pub codigo: String,
    pub lat: f64,
    pub lng: f64,
    pub estado: Option<PackageStatus>,
    pub descripcion: Option<String>,
}

/// Position update applied to an existing package.
///
/// Updates are full rewrites of the mutable fields: lat, lng and estado
/// are always all written together.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub lat: f64,
    pub lng: f64,
    pub estado: Option<PackageStatus>,
}

/// One recorded position of a package.
#[derive(Debug, Clone)]
pub struct Movement {
    pub id: i64,
    pub paquete_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub fecha: Timestamp,
}

/// A package together with its movement history, newest entry first.
#[derive(Debug, Clone)]
pub struct PackageWithHistory {
    pub package: Package,
    pub historial: Vec<Movement>,
}

/// Aggregate package counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageStats {
    pub total: i64,
    pub pendientes: i64,
    pub en_transito: i64,
    pub entregados: i64,
}
