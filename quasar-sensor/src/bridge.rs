use std::{collections::HashMap, time::Duration};

use quasar_host::{HostConnection, SensorPlatform};
use tokio::time::MissedTickBehavior;

use crate::{
    Result,
    config::Config,
    device::{Device, StateFeed},
    entity::{CapabilityUpdate as _, YandexSensor},
    setup::async_setup_entry,
    source::DeviceSource,
};

pub const PROVIDER: &str = "quasar-sensor";

/// Applies a freshly fetched device list to `entities`. Entities whose device
/// is gone from the list lose their value.
pub fn refresh(entities: &mut [YandexSensor], devices: &[Device]) {
    let feeds = devices
        .iter()
        .map(|device| (device.id.as_str(), device.state_feed()))
        .collect::<HashMap<_, _>>();

    let gone = StateFeed::default();

    for entity in entities {
        let feed = feeds.get(entity.base().device_id()).unwrap_or(&gone);
        entity.internal_update(&feed.capabilities, &feed.properties);
    }
}

/// Connects to the broker, registers the sensors from `source` and keeps
/// publishing their values every `poll_interval`.
pub async fn bridge(
    addr: &str,
    client_id: &str,
    config: &Config,
    source: &impl DeviceSource,
    poll_interval: Duration,
) -> Result<()> {
    let conn = HostConnection::connect(client_id, addr).await?;

    tokio::spawn({
        let conn = conn.clone();

        async move {
            loop {
                match conn.recv_raw().await {
                    Ok(packet) => tracing::trace!("Received packet: {packet:?}"),
                    Err(e) => {
                        tracing::error!("MQTT receive failed: {e}");
                        break;
                    }
                }
            }
        }
    });

    let mut platform = SensorPlatform::new(conn, PROVIDER);

    let devices = source.devices().await?;
    let mut entities = async_setup_entry(config, &devices, &mut platform).await?;

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let devices = match source.devices().await {
            Ok(devices) => devices,
            Err(e) => {
                tracing::warn!("Failed to refresh devices: {e}");
                continue;
            }
        };

        refresh(&mut entities, &devices);

        for entity in &entities {
            platform.write_state(entity).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::IncludeRule, setup::discover};

    fn climate(temperature: serde_json::Value) -> Device {
        serde_json::from_value(serde_json::json!({
            "id": "c7",
            "name": "Study",
            "type": "devices.types.sensor",
            "properties": [
                {
                    "type": "devices.properties.float",
                    "parameters": { "instance": "temperature" },
                    "state": { "instance": "temperature", "value": temperature }
                },
                {
                    "type": "devices.properties.float",
                    "parameters": { "instance": "humidity" },
                    "state": { "instance": "humidity", "value": 45 }
                }
            ]
        }))
        .unwrap()
    }

    fn sensors() -> Vec<YandexSensor> {
        let config = Config { include: vec![IncludeRule::Device("Study".to_owned())] };
        discover(&config, &[climate(serde_json::json!(20.0))]).unwrap()
    }

    #[test]
    fn refresh_overwrites_values() {
        let mut entities = sensors();

        refresh(&mut entities, &[climate(serde_json::json!(22.5))]);

        assert_eq!(entities[0].native_value(), Some(22.5));
        assert_eq!(entities[1].native_value(), Some(45.0));
    }

    #[test]
    fn refresh_clears_missing_values() {
        let mut entities = sensors();

        refresh(&mut entities, &[climate(serde_json::Value::Null)]);
        assert_eq!(entities[0].native_value(), None);
        assert_eq!(entities[1].native_value(), Some(45.0));

        refresh(&mut entities, &[]);
        assert!(entities.iter().all(|e| e.native_value().is_none()));
    }
}
