//! Device descriptors as reported by the Yandex smart home API.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Latest reported values, keyed by instance
pub type StateMap = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, rename = "room_name", alias = "room")]
    pub room: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<PropertyConfig>,
    #[serde(default)]
    pub properties: Vec<PropertyConfig>,
}

/// A single capability or property of a device. Both share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "retrievable_default")]
    pub retrievable: bool,
    #[serde(default)]
    pub parameters: PropertyParameters,
    #[serde(default)]
    pub state: Option<PropertyState>,
}

fn retrievable_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyParameters {
    #[serde(default = "instance_default")]
    pub instance: String,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Default for PropertyParameters {
    fn default() -> Self {
        Self { instance: instance_default(), unit: None }
    }
}

// on_off capabilities are reported without an instance
fn instance_default() -> String {
    "on".to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyState {
    pub instance: String,
    #[serde(default)]
    pub value: Value,
}

/// Values of one device at one point in time, as handed to entity updates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateFeed {
    pub capabilities: StateMap,
    pub properties: StateMap,
}

fn collect(configs: &[PropertyConfig]) -> StateMap {
    configs
        .iter()
        .filter_map(|config| config.state.as_ref())
        .filter(|state| !state.value.is_null())
        .map(|state| (state.instance.clone(), state.value.clone()))
        .collect()
}

impl Device {
    pub fn state_feed(&self) -> StateFeed {
        StateFeed {
            capabilities: collect(&self.capabilities),
            properties: collect(&self.properties),
        }
    }
}
