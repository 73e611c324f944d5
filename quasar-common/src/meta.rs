//! Retained metadata published under `$meta` topics
//!
//! ```plain
//! quasar/entities/{id}/$meta/name        => "Kitchen sensor Temperature"
//! quasar/entities/{id}/$meta/status      => "online"
//! quasar/entities/{id}/{cap}/$meta/version => 1
//! ```

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{Property, property};

pub trait MetaField: Property {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Online,
    Offline,
}

property! {
    MetaField, Meta, key = "name";
    #[serde(transparent)]
    pub struct Name(pub CompactString);
}

property! {
    MetaField, Meta, key = "type";
    #[serde(transparent)]
    pub struct Type(pub CompactString);
}

property! {
    MetaField, Meta, key = "provider";
    #[serde(transparent)]
    pub struct Provider(pub CompactString);
}

property! {
    MetaField, Meta, key = "unique_id";
    #[serde(transparent)]
    pub struct UniqueId(pub CompactString);
}

property! {
    MetaField, Meta, key = "status";
    #[serde(transparent)]
    pub struct Status(pub EntityStatus);
}

property! {
    MetaField, Meta, key = "version";
    #[serde(transparent)]
    pub struct Version(pub i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_format() {
        assert_eq!(Name::KEY, "name");
        assert_eq!(
            serde_json::to_value(Name("Balcony Humidity".into())).unwrap(),
            serde_json::json!("Balcony Humidity")
        );
        assert_eq!(
            serde_json::to_value(Status(EntityStatus::Online)).unwrap(),
            serde_json::json!("online")
        );
        assert_eq!(serde_json::to_value(Version(1)).unwrap(), serde_json::json!(1));
    }
}
