//! User configuration: which devices and properties to expose.
//!
//! ```json
//! {
//!     "include": [
//!         "Kitchen sensor",
//!         { "room": "Bedroom", "properties": ["temperature", "humidity"] }
//!     ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub include: Vec<IncludeRule>,
}

impl Config {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Self::from_slice(&data)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IncludeRule {
    /// Device id or name
    Device(String),
    Match(IncludeMatch),
}

/// Matches devices on every field that is set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeMatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    /// Instances to expose, instead of everything the device type allows
    #[serde(default)]
    pub properties: Option<Vec<String>>,
}

impl IncludeRule {
    pub fn properties(&self) -> Option<&[String]> {
        match self {
            IncludeRule::Device(_) => None,
            IncludeRule::Match(rule) => rule.properties.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rules() {
        let config = Config::from_slice(
            br#"{
                "include": [
                    "Kitchen sensor",
                    { "room": "Bedroom", "properties": ["temperature"] },
                    { "id": "0b1e7c4d" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.include, vec![
            IncludeRule::Device("Kitchen sensor".to_owned()),
            IncludeRule::Match(IncludeMatch {
                room: Some("Bedroom".to_owned()),
                properties: Some(vec!["temperature".to_owned()]),
                ..Default::default()
            }),
            IncludeRule::Match(IncludeMatch {
                id: Some("0b1e7c4d".to_owned()),
                ..Default::default()
            }),
        ]);

        assert_eq!(config.include[0].properties(), None);
        assert_eq!(config.include[1].properties(), Some(&["temperature".to_owned()][..]));
        assert_eq!(config.include[2].properties(), None);
    }

    #[test]
    fn empty_config_includes_nothing() {
        assert!(Config::from_slice(b"{}").unwrap().include.is_empty());
    }

    #[test]
    fn reject_malformed_rules() {
        assert!(Config::from_slice(br#"{ "include": [{ "rooom": "Bedroom" }] }"#).is_err());
        assert!(Config::from_slice(br#"{ "include": [42] }"#).is_err());
        assert!(Config::from_slice(br#"{ "include": "Kitchen sensor" }"#).is_err());
    }
}
