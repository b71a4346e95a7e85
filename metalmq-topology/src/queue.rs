use log::{debug, error, info, warn};
use std::fmt;
use std::sync::Arc;

use crate::arguments::{self, BrokerArguments};
use crate::channel::{Channel, Connection, DeliveredMessage};
use crate::model::QueueDefinitionOptions;
use crate::resolver::{self, QueueDefinition};
use crate::topology::Topology;
use crate::{Result, TopologyError};

/// What needs to be sent to the broker to define a queue.
#[derive(Debug, PartialEq)]
pub enum Operation {
    /// Passive declaration, only the existence of the queue is checked.
    Check,
    /// Declaration with the arguments.
    Assert(BrokerArguments),
}

/// Decides if the queue needs to be checked or declared.
pub fn plan(definition: &QueueDefinition) -> Operation {
    if definition.passive {
        Operation::Check
    } else {
        Operation::Assert(arguments::build(definition))
    }
}

/// How a queue handle was defined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DefineMode {
    Verified,
    Declared,
}

/// Defines one queue on the broker. `define` consumes the definer, so a queue can be defined
/// once with it.
pub struct QueueDefiner<S = ()> {
    definition: QueueDefinition,
    connection: Arc<dyn Connection>,
    serializers: Arc<S>,
}

/// Creates the definer of a queue. The options are validated here, no broker call is made.
pub fn create_queue_definition<S>(
    options: QueueDefinitionOptions,
    topology: &Topology,
    serializers: Arc<S>,
) -> Result<QueueDefiner<S>> {
    QueueDefiner::new(options, topology, serializers)
}

impl<S> QueueDefiner<S> {
    pub fn new(options: QueueDefinitionOptions, topology: &Topology, serializers: Arc<S>) -> Result<Self> {
        let definition = resolver::resolve(&options)?;

        for field in &definition.deprecated {
            warn!("Queue {} uses deprecated option {}", definition.name, field);
        }

        Ok(QueueDefiner {
            definition,
            connection: topology.connection(),
            serializers,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &QueueDefinition {
        &self.definition
    }

    /// Checks or declares the queue depending on the `passive` option. The channel is acquired
    /// from the connection for this call, and errors are not retried.
    pub async fn define(self) -> Result<QueueHandle<S>> {
        let channel = match self.connection.get_channel().await {
            Ok(channel) => channel,
            Err(e) => return Err(self.failed(e)),
        };

        let (mode, result) = match plan(&self.definition) {
            Operation::Check => {
                debug!("Verifying queue {}", self.definition.name);

                (DefineMode::Verified, channel.check_queue(&self.definition.name).await)
            }
            Operation::Assert(args) => {
                debug!("Declaring queue {} with {:?}", self.definition.name, args);

                (
                    DefineMode::Declared,
                    channel.assert_queue(&self.definition.name, &args).await,
                )
            }
        };

        if let Err(e) = result {
            return Err(self.failed(e));
        }

        info!("Queue {} is {:?}", self.definition.name, mode);

        Ok(QueueHandle {
            name: self.definition.name,
            mode,
            channel,
            serializers: self.serializers,
        })
    }

    fn failed(&self, cause: anyhow::Error) -> TopologyError {
        error!("Defining queue {} failed: {:?}", self.definition.name, cause);

        TopologyError::QueueDefinitionFailed {
            queue: self.definition.name.clone(),
            cause,
        }
    }
}

impl<S> fmt::Debug for QueueDefiner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueDefiner")
            .field("definition", &self.definition)
            .finish()
    }
}

/// A defined queue. Acknowledgements are sent through the channel the queue was defined on.
pub struct QueueHandle<S = ()> {
    name: String,
    mode: DefineMode,
    channel: Arc<dyn Channel>,
    serializers: Arc<S>,
}

impl<S> QueueHandle<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> DefineMode {
        self.mode
    }

    pub fn serializers(&self) -> &Arc<S> {
        &self.serializers
    }

    pub async fn ack(&self, message: &DeliveredMessage) -> Result<()> {
        self.channel
            .ack(message)
            .await
            .map_err(|cause| self.ack_failed(message, cause))
    }

    pub async fn nack(&self, message: &DeliveredMessage) -> Result<()> {
        self.channel
            .nack(message)
            .await
            .map_err(|cause| self.ack_failed(message, cause))
    }

    fn ack_failed(&self, message: &DeliveredMessage, cause: anyhow::Error) -> TopologyError {
        error!(
            "Acknowledging {} on queue {} failed: {:?}",
            message.delivery_tag, self.name, cause
        );

        TopologyError::AcknowledgeFailed {
            queue: self.name.clone(),
            delivery_tag: message.delivery_tag,
            cause,
        }
    }
}

impl<S> fmt::Debug for QueueHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueueHandle{{Name={:?}, Mode={:?}}}", self.name, self.mode)
    }
}
