use compact_str::ToCompactString;
use quasar_common::capabilities::{
    ids,
    sensor::{DeviceClass, SensorMetadata, SensorPayload, StateClass, UnitOfMeasurement},
};

use crate::{PublishOpts, Result, capability};

capability! {
    id = ids::SENSOR, version = 1;
    pub struct Sensor {
        cap: HostCapability,
    }
}

impl Sensor {
    /// Publishes what the sensor measures. Retained, so late subscribers see it.
    pub async fn describe(&self, metadata: SensorMetadata) -> Result<()> {
        self.cap
            .publish_meta(DeviceClass(metadata.device_class))
            .await?;
        self.cap
            .publish_meta(UnitOfMeasurement(metadata.unit))
            .await?;
        self.cap
            .publish_meta(StateClass(metadata.state_class))
            .await
    }

    pub async fn publish(&self, key: impl ToCompactString, payload: SensorPayload) -> Result<()> {
        self.cap
            .publish_raw(key, &payload, PublishOpts::entity_data())
            .await
    }
}
