use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{invalid_config, TopologyError};

/// Queue implementation strategy on the broker side.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueType {
    Classic,
    Quorum,
}

impl QueueType {
    /// The value of the `x-queue-type` argument.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueType::Classic => "classic",
            QueueType::Quorum => "quorum",
        }
    }
}

impl fmt::Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueType {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(QueueType::Classic),
            "quorum" => Ok(QueueType::Quorum),
            other => invalid_config!(None, "unknown queue type {:?}", other),
        }
    }
}

/// Declarative description of a queue as the user configures it.
///
/// Every field except the name is optional. Absent fields are not sent to the broker, and when
/// the type is absent the options are forwarded as they are (see [`crate::arguments::build`]).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QueueDefinitionOptions {
    #[serde(alias = "unique_name")]
    pub unique_name: String,
    /// If true the queue is only checked for existence, never declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub queue_type: Option<QueueType>,
    #[serde(alias = "queue_limit", default, skip_serializing_if = "Option::is_none")]
    pub queue_limit: Option<u64>,
    /// Deprecated.
    #[serde(alias = "max_priority", default, skip_serializing_if = "Option::is_none")]
    pub max_priority: Option<u32>,
    /// Deprecated.
    #[serde(alias = "auto_delete", default, skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    /// Quorum queues only.
    #[serde(alias = "dead_letter_strategy", default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_strategy: Option<String>,
    /// Classic queues only.
    #[serde(alias = "queue_version", default, skip_serializing_if = "Option::is_none")]
    pub queue_version: Option<u32>,
}

impl QueueDefinitionOptions {
    pub fn new(unique_name: &str) -> Self {
        Self {
            unique_name: unique_name.to_string(),
            ..Default::default()
        }
    }

    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }

    pub fn queue_type(mut self, queue_type: QueueType) -> Self {
        self.queue_type = Some(queue_type);
        self
    }

    pub fn queue_limit(mut self, limit: u64) -> Self {
        self.queue_limit = Some(limit);
        self
    }

    pub fn max_priority(mut self, priority: u32) -> Self {
        self.max_priority = Some(priority);
        self
    }

    pub fn auto_delete(mut self, mode: bool) -> Self {
        self.auto_delete = Some(mode);
        self
    }

    pub fn dead_letter_strategy(mut self, strategy: &str) -> Self {
        self.dead_letter_strategy = Some(strategy.to_string());
        self
    }

    pub fn queue_version(mut self, version: u32) -> Self {
        self.queue_version = Some(version);
        self
    }
}

/// Legacy option fields which are kept for backward compatibility.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeprecatedField {
    AutoDelete,
    MaxPriority,
}

impl fmt::Display for DeprecatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeprecatedField::AutoDelete => f.write_str("autoDelete"),
            DeprecatedField::MaxPriority => f.write_str("maxPriority"),
        }
    }
}
