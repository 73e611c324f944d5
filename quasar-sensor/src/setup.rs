use std::collections::HashSet;

use quasar_host::AddEntities;

use crate::{
    Result,
    catalog::{INCLUDE_PROPERTIES, INCLUDE_TYPES, SensorInstance},
    config::Config,
    device::Device,
    entity::{self, YandexSensor},
    filter::{device_include, instance_include},
};

/// Builds one sensor per included float property, in device order and then
/// property order.
pub fn discover(config: &Config, devices: &[Device]) -> Result<Vec<YandexSensor>> {
    let mut entities = vec![];
    let mut taken = HashSet::new();

    for device in devices {
        let Some(rule) = device_include(device, &config.include) else {
            continue;
        };

        let instances: Vec<&str> = match rule.properties() {
            Some(properties) => properties.iter().map(String::as_str).collect(),
            None if INCLUDE_TYPES.contains(&device.kind.as_str()) => SensorInstance::KEYS.to_vec(),
            None => {
                tracing::debug!(
                    device = %device.name,
                    kind = %device.kind,
                    "Unsupported device type without explicit properties"
                );
                continue;
            }
        };

        for property in &device.properties {
            if !property.retrievable {
                tracing::debug!(
                    device = %device.name,
                    instance = %property.parameters.instance,
                    "Skipping property that cannot be read"
                );
                continue;
            }

            if !instance_include(property, &instances, INCLUDE_PROPERTIES) {
                continue;
            }

            if !SensorInstance::KEYS.contains(&property.parameters.instance.as_str()) {
                tracing::debug!(
                    device = %device.name,
                    instance = %property.parameters.instance,
                    "Skipping unsupported instance"
                );
                continue;
            }

            let mut sensor = entity::build::<YandexSensor>(device, property)?;
            sensor.claim_entity_id(&mut taken);
            entities.push(sensor);
        }
    }

    Ok(entities)
}

/// Registers the sensors for `devices` with the host and returns them so they
/// can be refreshed later.
pub async fn async_setup_entry(
    config: &Config,
    devices: &[Device],
    add_entities: &mut impl AddEntities<YandexSensor>,
) -> Result<Vec<YandexSensor>> {
    let entities = discover(config, devices)?;

    tracing::info!("Found {} sensors on {} devices", entities.len(), devices.len());

    Ok(add_entities.add_entities(entities, true).await?)
}
