use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use quasar_common::EntityId;

use crate::{
    HostConnection, HostEntity, Result,
    capabilities::{Capability, sensor::Sensor},
};

/// Lazily created host entities and their capabilities, keyed by entity id
pub struct Registry {
    conn: Arc<HostConnection>,
    entities: HashMap<EntityId, Arc<HostEntity>>,
    sensors: HashMap<EntityId, Sensor>,
}

async fn get<'a, T: Capability>(
    conn: &Arc<HostConnection>,
    entities: &mut HashMap<EntityId, Arc<HostEntity>>,
    cap_map: &'a mut HashMap<EntityId, T>,
    id: &EntityId,
    init: impl AsyncFnOnce(&HostEntity) -> Result<()>,
) -> Result<&'a mut T> {
    let cap = cap_map.entry(id.clone());
    let out = match cap {
        Entry::Occupied(cap) => cap.into_mut(),
        Entry::Vacant(entry) => {
            let entity = match entities.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let entity = conn.entity(id.clone()).await?;
                    init(&entity).await?;
                    entry.insert(entity)
                }
            };

            let cap = entity.capability::<T>().await?;
            entry.insert(cap)
        }
    };

    Ok(out)
}

impl Registry {
    pub fn new(conn: Arc<HostConnection>) -> Self {
        Self { conn, entities: HashMap::new(), sensors: HashMap::new() }
    }

    /// Returns the sensor capability of `id`, creating the entity and running
    /// `entity_init` on it first if it does not exist yet.
    pub async fn sensor(
        &mut self,
        id: &EntityId,
        entity_init: impl AsyncFnOnce(&HostEntity) -> Result<()>,
    ) -> Result<&mut Sensor> {
        get(&self.conn, &mut self.entities, &mut self.sensors, id, entity_init).await
    }

    pub fn existing_sensor(&self, id: &EntityId) -> Option<&Sensor> {
        self.sensors.get(id)
    }
}
