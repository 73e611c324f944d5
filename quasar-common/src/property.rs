use core::fmt::Debug;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Persistent state from the entity (eg. sensor readings)
    State,
    /// Retained description of an entity or capability (eg. unit of measurement)
    Meta,
}

pub trait Property: Debug + Clone + Serialize + for<'de> Deserialize<'de> {
    const KEY: &'static str;
    const KIND: PropertyKind;
}
