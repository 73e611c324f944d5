use std::collections::HashSet;

use heck::ToSnakeCase as _;
use quasar_common::{EntityId, capabilities::sensor::SensorMetadata};
use quasar_host::SensorEntity;

use crate::{
    Result,
    catalog::{SensorDescription, SensorInstance},
    device::{Device, PropertyConfig, StateMap},
};

/// Identity shared by every entity built from a device facet
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBase {
    device_id: String,
    device_name: String,
    device_type: String,
    instance: String,
    unique_id: String,
}

impl EntityBase {
    pub fn new(device: &Device, config: &PropertyConfig) -> Self {
        let instance = config.parameters.instance.clone();

        Self {
            unique_id: format!("{}: {}", device.id, instance),
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            device_type: device.kind.clone(),
            instance,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }
}

/// Hooks an entity implements to follow its device's reported state.
pub trait CapabilityUpdate: Sized {
    /// Builds the entity around `base`, before any state is applied.
    fn internal_init(
        base: EntityBase,
        capabilities: &StateMap,
        properties: &StateMap,
    ) -> Result<Self>;

    /// Applies freshly reported state. Must not fail; values that are
    /// missing or unusable leave the entity unset.
    fn internal_update(&mut self, capabilities: &StateMap, properties: &StateMap);

    fn base(&self) -> &EntityBase;
}

/// Creates an entity for one facet of `device` and applies the device's
/// current state to it.
pub fn build<E: CapabilityUpdate>(device: &Device, config: &PropertyConfig) -> Result<E> {
    let feed = device.state_feed();

    let mut entity = E::internal_init(
        EntityBase::new(device, config),
        &feed.capabilities,
        &feed.properties,
    )?;
    entity.internal_update(&feed.capabilities, &feed.properties);

    Ok(entity)
}

#[derive(Debug, Clone, PartialEq)]
pub struct YandexSensor {
    base: EntityBase,
    description: &'static SensorDescription,
    entity_id: EntityId,
    name: String,
    native_value: Option<f64>,
}

impl YandexSensor {
    pub fn description(&self) -> &'static SensorDescription {
        self.description
    }

    pub fn native_value(&self) -> Option<f64> {
        self.native_value
    }

    /// Claims this sensor's entity id in `taken`, appending `_2`, `_3`, ...
    /// while it collides with one claimed earlier.
    pub fn claim_entity_id(&mut self, taken: &mut HashSet<EntityId>) {
        let wanted = self.entity_id.clone();
        let mut n = 1;

        while !taken.insert(self.entity_id.clone()) {
            n += 1;
            self.entity_id = EntityId::from(format!("{wanted}_{n}"));
        }

        if n > 1 {
            tracing::debug!(
                unique_id = self.base.unique_id(),
                "Entity id {wanted} already taken, using {}",
                self.entity_id
            );
        }
    }
}

impl CapabilityUpdate for YandexSensor {
    fn internal_init(base: EntityBase, _: &StateMap, _: &StateMap) -> Result<Self> {
        let instance: SensorInstance = base.instance().parse()?;

        Ok(Self {
            entity_id: EntityId::from(
                format!("{} {}", base.device_name(), instance.key()).to_snake_case(),
            ),
            name: format!("{} {}", base.device_name(), instance.label()),
            description: instance.description(),
            native_value: None,
            base,
        })
    }

    fn internal_update(&mut self, _: &StateMap, properties: &StateMap) {
        self.native_value = match properties.get(self.base.instance()) {
            None => None,
            Some(value) => {
                let number = value.as_f64();
                if number.is_none() {
                    tracing::warn!(
                        unique_id = self.base.unique_id(),
                        "Failed to read sensor value '{value}' as number"
                    );
                }
                number
            }
        };
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }
}

impl SensorEntity for YandexSensor {
    fn entity_id(&self) -> EntityId {
        self.entity_id.clone()
    }

    fn unique_id(&self) -> &str {
        self.base.unique_id()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn device_type(&self) -> &str {
        &self.base.device_type
    }

    fn sensor_key(&self) -> &str {
        self.description.key.key()
    }

    fn metadata(&self) -> SensorMetadata {
        self.description.metadata
    }

    fn native_value(&self) -> Option<f64> {
        self.native_value
    }
}

#[cfg(test)]
mod tests {
    use quasar_common::capabilities::sensor::{SensorDeviceClass, SensorStateClass, Unit};

    use super::*;
    use crate::Error;

    fn meter() -> Device {
        serde_json::from_value(serde_json::json!({
            "id": "9c0d5e1f",
            "name": "Hallway Meter",
            "type": "devices.types.smart_meter",
            "properties": [
                {
                    "type": "devices.properties.float",
                    "parameters": { "instance": "battery_level", "unit": "unit.percent" },
                    "state": { "instance": "battery_level", "value": 87 }
                },
                {
                    "type": "devices.properties.float",
                    "parameters": { "instance": "co2_level", "unit": "unit.ppm" },
                    "state": { "instance": "co2_level", "value": 612 }
                }
            ]
        }))
        .unwrap()
    }

    fn properties(value: serde_json::Value) -> StateMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sensor_identity() {
        let device = meter();
        let sensor: YandexSensor = build(&device, &device.properties[0]).unwrap();

        assert_eq!(sensor.base().device_id(), "9c0d5e1f");
        assert_eq!(sensor.base().instance(), "battery_level");
        assert_eq!(SensorEntity::unique_id(&sensor), "9c0d5e1f: battery_level");
        assert_eq!(SensorEntity::name(&sensor), "Hallway Meter Battery level");
        assert_eq!(sensor.entity_id(), EntityId::from("hallway_meter_battery_level"));
        assert_eq!(sensor.device_type(), "devices.types.smart_meter");
        assert_eq!(sensor.sensor_key(), "battery_level");
        assert_eq!(sensor.metadata(), SensorMetadata {
            device_class: SensorDeviceClass::Battery,
            unit: Unit::Percentage,
            state_class: SensorStateClass::Measurement,
        });
    }

    #[test]
    fn starts_with_reported_value() {
        let device = meter();
        let sensor: YandexSensor = build(&device, &device.properties[0]).unwrap();

        assert_eq!(sensor.native_value(), Some(87.0));
    }

    #[test]
    fn update_overwrites_and_clears() {
        let device = meter();
        let mut sensor: YandexSensor = build(&device, &device.properties[0]).unwrap();
        let capabilities = StateMap::new();

        let update = properties(serde_json::json!({ "battery_level": 64 }));
        sensor.internal_update(&capabilities, &update);
        assert_eq!(sensor.native_value(), Some(64.0));

        let update = properties(serde_json::json!({ "temperature": 20.5 }));
        sensor.internal_update(&capabilities, &update);
        assert_eq!(sensor.native_value(), None);
    }

    #[test]
    fn non_numeric_value_is_unset() {
        let device = meter();
        let mut sensor: YandexSensor = build(&device, &device.properties[0]).unwrap();

        sensor.internal_update(
            &StateMap::new(),
            &properties(serde_json::json!({ "battery_level": "low" })),
        );
        assert_eq!(sensor.native_value(), None);
    }

    #[test]
    fn unsupported_instance_fails_init() {
        let device = meter();

        assert!(matches!(
            build::<YandexSensor>(&device, &device.properties[1]),
            Err(Error::UnsupportedInstance(instance)) if instance == "co2_level"
        ));
    }

    #[test]
    fn colliding_entity_ids_get_suffixed() {
        let device = meter();
        let mut first: YandexSensor = build(&device, &device.properties[0]).unwrap();
        let mut second = first.clone();
        let mut third = first.clone();
        let mut taken = HashSet::new();

        first.claim_entity_id(&mut taken);
        second.claim_entity_id(&mut taken);
        third.claim_entity_id(&mut taken);

        assert_eq!(first.entity_id(), EntityId::from("hallway_meter_battery_level"));
        assert_eq!(second.entity_id(), EntityId::from("hallway_meter_battery_level_2"));
        assert_eq!(third.entity_id(), EntityId::from("hallway_meter_battery_level_3"));
    }
}
