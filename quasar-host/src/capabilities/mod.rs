use core::ops::Deref;
use std::sync::Arc;

use compact_str::{CompactString, ToCompactString};
use quasar_common::{QuasarString, Topic, meta};
use serde::Serialize;

use crate::{HostEntity, PublishOpts, Result};

pub mod sensor;

pub struct HostCapability {
    pub(crate) entity: Arc<HostEntity>,
    pub(crate) capability: QuasarString,
}

impl HostCapability {
    pub async fn initialize(&self, version: i32) -> Result<()> {
        self.publish_meta(meta::Version(version)).await
    }

    pub async fn publish_raw(
        &self,
        topic: impl ToCompactString,
        payload: impl Serialize,
        opts: PublishOpts,
    ) -> Result<()> {
        let topic = Topic::CapabilityData {
            entity: self.entity.id().clone(),
            capability: self.capability.clone(),
            rest: QuasarString::new(topic.to_compact_string()),
        };

        self.entity.conn.publish(topic, payload, opts).await
    }

    pub(crate) async fn publish_meta<T: meta::MetaField>(&self, meta: T) -> Result<()> {
        let topic = Topic::CapabilityMeta {
            entity: self.entity.id().clone(),
            capability: self.capability.clone(),
            key: QuasarString::new(CompactString::const_new(T::KEY)),
        };

        self.entity
            .conn
            .publish(topic, meta, PublishOpts::for_property::<T>())
            .await
    }
}

pub trait Capability: From<HostCapability> + Deref<Target = HostCapability> {
    const ID: &'static str;
    const VERSION: i32 = 0;
}

#[macro_export]
macro_rules! capability {
    (id = $id:expr, version = $version:expr; pub struct $name:ident { cap: HostCapability $(,)? }) => {
        pub struct $name {
            cap: $crate::capabilities::HostCapability,
        }

        impl $crate::capabilities::Capability for $name {
            const ID: &'static str = $id;
            const VERSION: i32 = $version;
        }

        impl From<$crate::capabilities::HostCapability> for $name {
            fn from(cap: $crate::capabilities::HostCapability) -> Self {
                Self { cap }
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $crate::capabilities::HostCapability;

            fn deref(&self) -> &Self::Target {
                &self.cap
            }
        }
    };
}
