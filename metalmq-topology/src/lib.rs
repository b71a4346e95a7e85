//! Queue definitions of an AMQP topology.
//!
//! The options of a queue are resolved to a canonical definition, from which the arguments of
//! the queue declaration are built. Depending on the `passive` option the queue is checked or
//! declared on a channel given by the [`Connection`].

mod dev;
pub use dev::setup_logger;

pub mod arguments;
pub use arguments::{BrokerArguments, FieldTable, FieldValue};

pub mod channel;
pub use channel::{Channel, Connection, DeliveredMessage};

pub mod config;

mod error;
pub use error::{Result, TopologyError};

mod model;
pub use model::{DeprecatedField, QueueDefinitionOptions, QueueType};

pub mod queue;
pub use queue::{create_queue_definition, DefineMode, QueueDefiner, QueueHandle};

pub mod resolver;
pub use resolver::{QueueDefinition, QueueKind};

mod topology;
pub use topology::{validate_queues, Topology};
