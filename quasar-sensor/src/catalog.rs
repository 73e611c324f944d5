//! The fixed set of float properties exposed as sensors.

use core::{fmt::Display, str::FromStr};

use quasar_common::capabilities::sensor::{
    SensorDeviceClass, SensorMetadata, SensorStateClass, Unit,
};

use crate::Error;

/// Device types whose float properties are all exposed unless a rule lists
/// properties explicitly
pub const INCLUDE_TYPES: &[&str] = &["devices.types.sensor"];

/// Property types that can become sensors
pub const INCLUDE_PROPERTIES: &[&str] = &["devices.properties.float"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorInstance {
    Temperature,
    Humidity,
    Illumination,
    BatteryLevel,
    Pressure,
    Voltage,
    Power,
    Amperage,
}

impl SensorInstance {
    pub const ALL: [SensorInstance; 8] = [
        SensorInstance::Temperature,
        SensorInstance::Humidity,
        SensorInstance::Illumination,
        SensorInstance::BatteryLevel,
        SensorInstance::Pressure,
        SensorInstance::Voltage,
        SensorInstance::Power,
        SensorInstance::Amperage,
    ];

    /// Instance keys of [`Self::ALL`], in the same order
    pub const KEYS: [&'static str; 8] = [
        "temperature",
        "humidity",
        "illumination",
        "battery_level",
        "pressure",
        "voltage",
        "power",
        "amperage",
    ];

    pub const fn key(self) -> &'static str {
        match self {
            SensorInstance::Temperature => "temperature",
            SensorInstance::Humidity => "humidity",
            SensorInstance::Illumination => "illumination",
            SensorInstance::BatteryLevel => "battery_level",
            SensorInstance::Pressure => "pressure",
            SensorInstance::Voltage => "voltage",
            SensorInstance::Power => "power",
            SensorInstance::Amperage => "amperage",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SensorInstance::Temperature => "Temperature",
            SensorInstance::Humidity => "Humidity",
            SensorInstance::Illumination => "Illumination",
            SensorInstance::BatteryLevel => "Battery level",
            SensorInstance::Pressure => "Pressure",
            SensorInstance::Voltage => "Voltage",
            SensorInstance::Power => "Power",
            SensorInstance::Amperage => "Amperage",
        }
    }

    pub const fn description(self) -> &'static SensorDescription {
        match self {
            SensorInstance::Temperature => &TEMPERATURE,
            SensorInstance::Humidity => &HUMIDITY,
            SensorInstance::Illumination => &ILLUMINATION,
            SensorInstance::BatteryLevel => &BATTERY_LEVEL,
            SensorInstance::Pressure => &PRESSURE,
            SensorInstance::Voltage => &VOLTAGE,
            SensorInstance::Power => &POWER,
            SensorInstance::Amperage => &AMPERAGE,
        }
    }
}

impl FromStr for SensorInstance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorInstance::ALL
            .into_iter()
            .find(|instance| instance.key() == s)
            .ok_or_else(|| Error::UnsupportedInstance(s.to_owned()))
    }
}

impl Display for SensorInstance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescription {
    pub key: SensorInstance,
    pub metadata: SensorMetadata,
}

const fn measurement(
    key: SensorInstance,
    device_class: SensorDeviceClass,
    unit: Unit,
) -> SensorDescription {
    SensorDescription {
        key,
        metadata: SensorMetadata { device_class, unit, state_class: SensorStateClass::Measurement },
    }
}

const TEMPERATURE: SensorDescription =
    measurement(SensorInstance::Temperature, SensorDeviceClass::Temperature, Unit::Celsius);
const HUMIDITY: SensorDescription =
    measurement(SensorInstance::Humidity, SensorDeviceClass::Humidity, Unit::Percentage);
const ILLUMINATION: SensorDescription =
    measurement(SensorInstance::Illumination, SensorDeviceClass::Illuminance, Unit::Lux);
const BATTERY_LEVEL: SensorDescription =
    measurement(SensorInstance::BatteryLevel, SensorDeviceClass::Battery, Unit::Percentage);
const PRESSURE: SensorDescription = measurement(
    SensorInstance::Pressure,
    SensorDeviceClass::Pressure,
    Unit::MillimeterOfMercury,
);
const VOLTAGE: SensorDescription =
    measurement(SensorInstance::Voltage, SensorDeviceClass::Voltage, Unit::Volt);
const POWER: SensorDescription =
    measurement(SensorInstance::Power, SensorDeviceClass::Power, Unit::Watt);
const AMPERAGE: SensorDescription =
    measurement(SensorInstance::Amperage, SensorDeviceClass::Current, Unit::Ampere);

pub const SENSOR_TYPES: [SensorDescription; 8] =
    [TEMPERATURE, HUMIDITY, ILLUMINATION, BATTERY_LEVEL, PRESSURE, VOLTAGE, POWER, AMPERAGE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_description() {
        let description = "temperature".parse::<SensorInstance>().unwrap().description();

        assert_eq!(description.key, SensorInstance::Temperature);
        assert_eq!(description.metadata.device_class, SensorDeviceClass::Temperature);
        assert_eq!(description.metadata.unit, Unit::Celsius);
        assert_eq!(description.metadata.state_class, SensorStateClass::Measurement);
    }

    #[test]
    fn every_instance_describes_itself() {
        for (i, instance) in SensorInstance::ALL.into_iter().enumerate() {
            assert_eq!(instance.description().key, instance);
            assert_eq!(SENSOR_TYPES[i].key, instance);
            assert_eq!(SensorInstance::KEYS[i], instance.key());
            assert_eq!(instance.key().parse::<SensorInstance>().unwrap(), instance);
        }
    }

    #[test]
    fn catalog_units() {
        let units = SENSOR_TYPES.map(|d| d.metadata.unit.as_str());
        assert_eq!(units, ["°C", "%", "lx", "%", "mmHg", "V", "W", "A"]);
    }

    #[test]
    fn unsupported_instance() {
        assert!(matches!(
            "co2".parse::<SensorInstance>(),
            Err(Error::UnsupportedInstance(instance)) if instance == "co2"
        ));
    }
}
