use core::sync::atomic::AtomicU16;
use std::sync::Arc;

use mqtt_endpoint_tokio::mqtt_ep::{
    self, Endpoint,
    packet::v5_0,
    role,
    transport::{TcpTransport, connect_helper},
};
use mqtt_protocol_core::mqtt::packet::{Qos, v5_0::Connack};
use quasar_common::{
    EntityId, Property, PropertyKind, QuasarString, Topic,
    meta::{self, MetaField},
};
use serde::Serialize;

use crate::capabilities::{Capability, HostCapability};

pub mod capabilities;
pub mod log;
pub mod platform;
pub mod registry;

pub use quasar_common as common;

pub use self::platform::{AddEntities, MqttSink, SensorEntity, SensorPlatform, SensorSink};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("mqtt transport error: {0}")]
    MqttTransport(#[from] mqtt_ep::TransportError),
    #[error("mqtt connection error: {0}")]
    MqttConnection(#[from] mqtt_ep::ConnectionError),
    #[error("mqtt packet field error: {0}")]
    MqttPacketField(&'static str),
    #[error("mqtt packet error: {0}")]
    MqttPacket(mqtt_ep::result_code::MqttError),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl From<mqtt_ep::result_code::MqttError> for Error {
    fn from(e: mqtt_ep::result_code::MqttError) -> Self {
        Error::MqttPacket(e)
    }
}

pub struct HostConnection {
    endpoint: Endpoint<role::Client>,
    next_payload_id: AtomicU16,
}

impl HostConnection {
    pub async fn connect(client_id: &str, addr: &str) -> Result<Arc<Self>> {
        let endpoint = mqtt_ep::endpoint::Endpoint::<role::Client>::new(mqtt_ep::Version::V5_0);

        let tcp_stream = connect_helper::connect_tcp(addr, None).await?;
        let transport = TcpTransport::from_stream(tcp_stream);
        endpoint
            .attach(transport, mqtt_ep::endpoint::Mode::Client)
            .await?;

        let connect = v5_0::Connect::builder().client_id(client_id)?.build()?;

        endpoint.send(connect).await?;

        let packet = endpoint.recv().await?;
        let connack: Connack = packet.try_into().map_err(Error::MqttPacketField)?;
        tracing::debug!("Received CONNACK: {connack:?}");

        Ok(HostConnection { endpoint, next_payload_id: AtomicU16::new(1) }.into())
    }

    fn next_payload_id(&self) -> u16 {
        loop {
            let id = self
                .next_payload_id
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

            if id != 0 {
                break id;
            }
        }
    }

    /// Receives the next packet from the broker.
    ///
    /// The host never subscribes, so everything arriving here is an
    /// acknowledgement. Something has to keep calling this for the endpoint to
    /// release packet ids.
    pub async fn recv_raw(&self) -> Result<mqtt_ep::packet::Packet> {
        let packet = self.endpoint.recv().await?;
        Ok(packet)
    }

    pub async fn publish(
        &self,
        topic: Topic,
        payload: impl Serialize,
        opts: PublishOpts,
    ) -> Result<()> {
        let payload = serde_json::to_string(&payload)?;

        tracing::debug!("Publishing to topic {topic}: {payload}");

        let publish = v5_0::Publish::builder()
            .topic_name(topic.to_string())?
            .payload(payload)
            .qos(opts.qos)
            .retain(opts.retain)
            .packet_id(self.next_payload_id())
            .build()?;

        if let Some(packet_id) = publish.packet_id() {
            self.endpoint.register_packet_id(packet_id).await?;
        }

        self.endpoint.send(publish).await?;

        Ok(())
    }

    pub async fn publish_entity_meta<T: MetaField>(&self, entity: EntityId, meta: T) -> Result<()> {
        self.publish(
            Topic::EntityMeta { entity, key: QuasarString::const_new(T::KEY) },
            meta,
            PublishOpts::for_property::<T>(),
        )
        .await
    }

    /// Creates an entity owned by this connection and marks it online.
    pub async fn entity(self: &Arc<Self>, id: impl Into<EntityId>) -> Result<Arc<HostEntity>> {
        let entity = HostEntity::new(id.into(), self.clone());

        entity.initialize().await?;

        Ok(entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishOpts {
    pub qos: Qos,
    pub retain: bool,
}

impl PublishOpts {
    pub const fn metadata() -> Self {
        Self { qos: Qos::AtLeastOnce, retain: true }
    }

    pub const fn entity_data() -> Self {
        Self { qos: Qos::AtLeastOnce, retain: true }
    }

    pub const fn for_property<T: Property>() -> Self {
        match T::KIND {
            PropertyKind::State => Self::entity_data(),
            PropertyKind::Meta => Self::metadata(),
        }
    }
}

pub struct HostEntity {
    id: EntityId,
    conn: Arc<HostConnection>,
}

impl HostEntity {
    pub(crate) fn new(id: EntityId, conn: Arc<HostConnection>) -> Arc<Self> {
        Arc::new(Self { id, conn })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub(crate) async fn initialize(&self) -> Result<()> {
        self.publish_meta(meta::Status(meta::EntityStatus::Online))
            .await
    }

    pub async fn publish_meta(&self, meta: impl MetaField) -> Result<()> {
        self.conn.publish_entity_meta(self.id.clone(), meta).await
    }

    pub async fn capability<C: Capability>(self: &Arc<Self>) -> Result<C> {
        let cap = C::from(HostCapability {
            entity: self.clone(),
            capability: QuasarString::const_new(C::ID),
        });

        cap.initialize(C::VERSION).await?;

        Ok(cap)
    }
}

#[cfg(test)]
mod tests {
    use quasar_common::{capabilities::sensor::DeviceClass, meta::Name};

    use super::*;

    #[test]
    fn metadata_is_retained() {
        assert_eq!(PublishOpts::for_property::<Name>(), PublishOpts::metadata());
        assert_eq!(PublishOpts::for_property::<DeviceClass>(), PublishOpts::metadata());
        assert!(PublishOpts::metadata().retain);
    }

    #[test]
    fn readings_are_retained() {
        let opts = PublishOpts::entity_data();
        assert!(opts.retain);
        assert_eq!(opts.qos, Qos::AtLeastOnce);
    }
}
