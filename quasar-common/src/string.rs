use core::{fmt::Display, ops::Deref};

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuasarString(CompactString);

impl QuasarString {
    pub fn new(compact_string: CompactString) -> Self {
        Self(compact_string)
    }

    pub const fn const_new(s: &'static str) -> Self {
        Self(CompactString::const_new(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for QuasarString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl<T: AsRef<str>> From<T> for QuasarString {
    fn from(value: T) -> Self {
        QuasarString(CompactString::from(value.as_ref()))
    }
}

impl<T: AsRef<str> + ?Sized> PartialEq<T> for QuasarString {
    fn eq(&self, other: &T) -> bool {
        self.0.as_str() == other.as_ref()
    }
}

impl Display for QuasarString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

pub trait ToQuasarString: ToCompactString {
    fn to_quasar_string(&self) -> QuasarString {
        QuasarString(self.to_compact_string())
    }
}

impl<T: ToCompactString> ToQuasarString for T {}

/// Identifier of a host entity, used as a topic segment
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub QuasarString);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: AsRef<str>> From<T> for EntityId {
    fn from(value: T) -> Self {
        EntityId(value.as_ref().to_quasar_string())
    }
}

impl Deref for EntityId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
