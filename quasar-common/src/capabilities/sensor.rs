//! A read-only numeric measurement
//!
//! The capability metadata describes what is measured, and a single data topic
//! named after the measured instance carries the latest reading.
//!
//! # Example Entity
//!
//! ```plain
//! ../quasar.sensor/$meta/version             => 1
//! ../quasar.sensor/$meta/device_class        => "temperature"
//! ../quasar.sensor/$meta/unit_of_measurement => "°C"
//! ../quasar.sensor/$meta/state_class         => "measurement"
//! ../quasar.sensor/temperature               -> { "value": 21.5, "unit": "°C", "timestamp": 1712345678 }
//! ```

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{meta::MetaField, property};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    /// Value of the sensor, `None` when the reading is unknown
    pub value: Option<f64>,
    /// Unit of the sensor value, e.g., "°C", "%", "V"
    pub unit: CompactString,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    Temperature,
    Humidity,
    Illuminance,
    Battery,
    Pressure,
    Voltage,
    Power,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStateClass {
    /// The value is a current reading, eg. a temperature
    Measurement,
    /// A monotonically changing total, eg. consumed energy
    Total,
    /// Like `Total`, but resets are treated as the start of a new cycle
    TotalIncreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "%")]
    Percentage,
    #[serde(rename = "lx")]
    Lux,
    #[serde(rename = "mmHg")]
    MillimeterOfMercury,
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "W")]
    Watt,
    #[serde(rename = "A")]
    Ampere,
}

impl Unit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Percentage => "%",
            Unit::Lux => "lx",
            Unit::MillimeterOfMercury => "mmHg",
            Unit::Volt => "V",
            Unit::Watt => "W",
            Unit::Ampere => "A",
        }
    }
}

/// Everything a host needs to know to display a sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorMetadata {
    pub device_class: SensorDeviceClass,
    pub unit: Unit,
    pub state_class: SensorStateClass,
}

property! {
    MetaField, Meta, key = "device_class";
    #[serde(transparent)]
    pub struct DeviceClass(pub SensorDeviceClass);
}

property! {
    MetaField, Meta, key = "unit_of_measurement";
    #[serde(transparent)]
    pub struct UnitOfMeasurement(pub Unit);
}

property! {
    MetaField, Meta, key = "state_class";
    #[serde(transparent)]
    pub struct StateClass(pub SensorStateClass);
}
