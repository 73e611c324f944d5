use std::path::PathBuf;

use serde::Deserialize;

use crate::{Result, device::Device};

/// Where the current device list comes from.
#[allow(async_fn_in_trait)]
pub trait DeviceSource {
    async fn devices(&self) -> Result<Vec<Device>>;
}

/// A JSON dump of the device list, re-read on every refresh.
///
/// Accepts either a bare array of devices or an object with a `devices` array.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Devices(Vec<Device>),
    Wrapped { devices: Vec<Device> },
}

pub fn parse_snapshot(data: &[u8]) -> Result<Vec<Device>> {
    let devices = match serde_json::from_slice(data)? {
        Snapshot::Devices(devices) => devices,
        Snapshot::Wrapped { devices } => devices,
    };

    Ok(devices)
}

impl DeviceSource for SnapshotFile {
    async fn devices(&self) -> Result<Vec<Device>> {
        let data = tokio::fs::read(&self.path).await?;
        parse_snapshot(&data)
    }
}
