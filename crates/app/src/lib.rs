//! FastTrack application layer: storage and package tracking services.

pub mod context;
pub mod database;
pub mod packages;
