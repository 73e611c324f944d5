pub mod bridge;
pub mod catalog;
pub mod config;
pub mod device;
pub mod entity;
pub mod filter;
pub mod setup;
pub mod source;

pub use self::{
    bridge::bridge,
    config::Config,
    entity::YandexSensor,
    setup::async_setup_entry,
    source::{DeviceSource, SnapshotFile},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("host error: {0}")]
    Host(#[from] quasar_host::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported sensor instance: {0}")]
    UnsupportedInstance(String),
}
