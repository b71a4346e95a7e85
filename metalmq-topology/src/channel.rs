use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::arguments::BrokerArguments;

/// A delivered message.
///
/// With the `consumer_tag` and `delivery_tag` a client can send back acknowledgements to the
/// server, saying that the message was successfully arrived.
#[derive(Clone, Debug, Default)]
pub struct DeliveredMessage {
    pub consumer_tag: String,
    pub delivery_tag: u64,
    pub redelivered: bool,
    pub exchange: String,
    pub routing_key: String,
    pub body: Vec<u8>,
}

/// The part of an AMQP channel the queue definitions use.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Checks if the queue exists (passive declare).
    async fn check_queue(&self, name: &str) -> Result<()>;

    /// Declares the queue, creates it if it doesn't exist.
    async fn assert_queue(&self, name: &str, args: &BrokerArguments) -> Result<()>;

    async fn ack(&self, message: &DeliveredMessage) -> Result<()>;

    async fn nack(&self, message: &DeliveredMessage) -> Result<()>;
}

/// Gives channels to the queue definitions. Opening, closing and reconnecting belongs to the
/// implementor.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn get_channel(&self) -> Result<Arc<dyn Channel>>;
}
