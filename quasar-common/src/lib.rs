#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::fmt::Display;

pub mod capabilities;
pub mod macros;
pub mod meta;

#[doc(hidden)]
pub use serde as _serde;

mod property;
mod string;
pub use property::*;
pub use string::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    EntityMeta {
        entity: EntityId,
        key: QuasarString,
    },
    CapabilityMeta {
        entity: EntityId,
        capability: QuasarString,
        key: QuasarString,
    },
    CapabilityData {
        entity: EntityId,
        capability: QuasarString,
        rest: QuasarString,
    },
}

impl Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Topic::EntityMeta { entity, key } => {
                write!(f, "quasar/entities/{}/$meta/{}", entity, key)
            }
            Topic::CapabilityMeta { entity, capability, key } => {
                write!(f, "quasar/entities/{}/{}/$meta/{}", entity, capability, key)
            }
            Topic::CapabilityData { entity, capability, rest } => {
                write!(f, "quasar/entities/{}/{}/{}", entity, capability, rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_serde() {
        assert_eq!(
            serde_json::to_string(&EntityId::from("kitchen_sensor_temperature")).unwrap(),
            r#""kitchen_sensor_temperature""#
        );

        assert_eq!(
            serde_json::from_str::<EntityId>(r#""kitchen_sensor_temperature""#).unwrap(),
            EntityId::from("kitchen_sensor_temperature")
        );
    }

    #[test]
    fn topic_display() {
        assert_eq!(
            Topic::EntityMeta {
                entity: EntityId::from("kitchen_sensor_temperature"),
                key: "status".to_quasar_string(),
            }
            .to_string(),
            "quasar/entities/kitchen_sensor_temperature/$meta/status"
        );

        assert_eq!(
            Topic::CapabilityMeta {
                entity: EntityId::from("kitchen_sensor_temperature"),
                capability: "quasar.sensor".to_quasar_string(),
                key: "device_class".to_quasar_string(),
            }
            .to_string(),
            "quasar/entities/kitchen_sensor_temperature/quasar.sensor/$meta/device_class"
        );

        assert_eq!(
            Topic::CapabilityData {
                entity: EntityId::from("kitchen_sensor_temperature"),
                capability: "quasar.sensor".to_quasar_string(),
                rest: "temperature".to_quasar_string(),
            }
            .to_string(),
            "quasar/entities/kitchen_sensor_temperature/quasar.sensor/temperature"
        );
    }
}
