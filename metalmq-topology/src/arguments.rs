//! Translates queue definitions to the arguments sent to the broker.

use serde_derive::Serialize;
use std::collections::BTreeMap;

use crate::model::QueueType;
use crate::resolver::{QueueDefinition, QueueKind};

pub const X_QUEUE_TYPE: &str = "x-queue-type";
pub const X_QUEUE_VERSION: &str = "x-queue-version";
pub const X_DEAD_LETTER_STRATEGY: &str = "x-dead-letter-strategy";

/// Value of a broker argument.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    LongString(String),
    LongLongInt(i64),
}

/// Broker native arguments, ordered by key.
pub type FieldTable = BTreeMap<String, FieldValue>;

/// The payload of a queue declaration: the option fields to send and the `x-` arguments.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_letter_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_version: Option<u32>,
    pub arguments: FieldTable,
}

impl BrokerArguments {
    /// Arguments having only the queue limit as option field and the queue type argument.
    fn limited(queue_limit: Option<u64>, queue_type: QueueType) -> Self {
        let mut args = BrokerArguments {
            queue_limit,
            ..Default::default()
        };

        args.insert(X_QUEUE_TYPE, FieldValue::LongString(queue_type.as_str().to_string()));
        args
    }

    fn insert(&mut self, key: &str, value: FieldValue) {
        self.arguments.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.arguments.get(key)
    }
}

/// Builds the declaration payload of a queue.
///
/// Fields which are not compatible with the queue type are dropped silently, so the same options
/// can be reused among queues of different types. When the type is not given the options are
/// sent unfiltered, and only the queue type argument is added.
pub fn build(definition: &QueueDefinition) -> BrokerArguments {
    match &definition.kind {
        QueueKind::Unspecified {
            passive,
            max_priority,
            auto_delete,
            queue_version,
            dead_letter_strategy,
        } => {
            let mut args = BrokerArguments {
                unique_name: Some(definition.name.clone()),
                passive: *passive,
                queue_limit: definition.queue_limit,
                max_priority: *max_priority,
                auto_delete: *auto_delete,
                dead_letter_strategy: dead_letter_strategy.clone(),
                queue_version: *queue_version,
                arguments: FieldTable::new(),
            };

            args.insert(
                X_QUEUE_TYPE,
                FieldValue::LongString(QueueType::Classic.as_str().to_string()),
            );
            args
        }
        QueueKind::Classic { queue_version } => {
            let mut args = BrokerArguments::limited(definition.queue_limit, QueueType::Classic);

            if let Some(version) = queue_version {
                args.insert(X_QUEUE_VERSION, FieldValue::LongLongInt(i64::from(*version)));
            }

            args
        }
        QueueKind::Quorum { dead_letter_strategy } => {
            let mut args = BrokerArguments::limited(definition.queue_limit, QueueType::Quorum);

            if let Some(strategy) = dead_letter_strategy {
                args.insert(X_DEAD_LETTER_STRATEGY, FieldValue::LongString(strategy.clone()));
            }

            args
        }
    }
}
