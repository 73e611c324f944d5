//! The sensor platform: how entities get handed to the host and how their
//! state reaches the display layer.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use compact_str::CompactString;
use quasar_common::{
    EntityId,
    capabilities::sensor::{SensorMetadata, SensorPayload},
    meta,
};

use crate::{HostConnection, HostEntity, Result, registry::Registry};

/// The view of a sensor entity the host needs to announce and display it.
pub trait SensorEntity {
    fn entity_id(&self) -> EntityId;
    fn unique_id(&self) -> &str;
    fn name(&self) -> &str;
    fn device_type(&self) -> &str;
    /// Data topic the reading is published under
    fn sensor_key(&self) -> &str;
    fn metadata(&self) -> SensorMetadata;
    fn native_value(&self) -> Option<f64>;
}

/// Callback handed to integrations during setup.
#[allow(async_fn_in_trait)]
pub trait AddEntities<E> {
    /// Registers `entities` with the host, publishing their current state
    /// right away when `update_before_add` is set. The accepted entities are
    /// handed back so the caller can keep refreshing them.
    async fn add_entities(&mut self, entities: Vec<E>, update_before_add: bool) -> Result<Vec<E>>;
}

pub fn state_payload(entity: &impl SensorEntity, timestamp: i64) -> SensorPayload {
    SensorPayload {
        value: entity.native_value(),
        unit: entity.metadata().unit.as_str().into(),
        timestamp,
    }
}

/// Where a platform sends announcements and readings.
#[allow(async_fn_in_trait)]
pub trait SensorSink {
    /// Makes `entity` known to the display layer, with its metadata.
    async fn announce<E: SensorEntity>(&mut self, entity: &E) -> Result<()>;

    /// Publishes a reading for an entity that was announced before.
    async fn publish_state(&self, id: &EntityId, key: &str, payload: SensorPayload) -> Result<()>;
}

/// Announces entities as MQTT host entities with a sensor capability.
pub struct MqttSink {
    registry: Registry,
    provider: CompactString,
}

impl MqttSink {
    pub fn new(conn: Arc<HostConnection>, provider: impl Into<CompactString>) -> Self {
        Self { registry: Registry::new(conn), provider: provider.into() }
    }
}

impl SensorSink for MqttSink {
    async fn announce<E: SensorEntity>(&mut self, entity: &E) -> Result<()> {
        let id = entity.entity_id();
        let provider = self.provider.clone();

        let sensor = self
            .registry
            .sensor(&id, async move |host: &HostEntity| {
                host.publish_meta(meta::Name(entity.name().into())).await?;
                host.publish_meta(meta::Type(entity.device_type().into()))
                    .await?;
                host.publish_meta(meta::Provider(provider)).await?;
                host.publish_meta(meta::UniqueId(entity.unique_id().into()))
                    .await
            })
            .await?;

        sensor.describe(entity.metadata()).await
    }

    async fn publish_state(&self, id: &EntityId, key: &str, payload: SensorPayload) -> Result<()> {
        match self.registry.existing_sensor(id) {
            Some(sensor) => sensor.publish(key, payload).await,
            None => {
                tracing::warn!(%id, "No sensor capability to publish to");
                Ok(())
            }
        }
    }
}

pub struct SensorPlatform<S = MqttSink> {
    sink: S,
    added: HashSet<EntityId>,
}

impl SensorPlatform {
    pub fn new(conn: Arc<HostConnection>, provider: impl Into<CompactString>) -> Self {
        Self::with_sink(MqttSink::new(conn, provider))
    }
}

impl<S: SensorSink> SensorPlatform<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink, added: HashSet::new() }
    }

    /// Publishes the entity's current value. Entities that were never added
    /// are skipped.
    pub async fn write_state<E: SensorEntity>(&self, entity: &E) -> Result<()> {
        let id = entity.entity_id();

        if !self.added.contains(&id) {
            tracing::warn!(%id, "Dropping state for unregistered entity");
            return Ok(());
        }

        let payload = state_payload(entity, Utc::now().timestamp());
        self.sink.publish_state(&id, entity.sensor_key(), payload).await
    }
}

impl<E: SensorEntity, S: SensorSink> AddEntities<E> for SensorPlatform<S> {
    async fn add_entities(&mut self, entities: Vec<E>, update_before_add: bool) -> Result<Vec<E>> {
        for entity in &entities {
            tracing::info!(
                id = %entity.entity_id(),
                unique_id = entity.unique_id(),
                "Registering sensor entity"
            );

            self.sink.announce(entity).await?;
            self.added.insert(entity.entity_id());

            if update_before_add {
                self.write_state(entity).await?;
            }
        }

        tracing::info!(
            "Added {} sensor entities, {} registered in total",
            entities.len(),
            self.added.len(),
        );

        Ok(entities)
    }
}
