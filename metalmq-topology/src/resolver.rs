//! Normalizes user supplied queue options into a canonical definition.

use crate::model::{DeprecatedField, QueueDefinitionOptions, QueueType};
use crate::{invalid_config, Result};

/// AMQP short strings cannot be longer than this.
pub const MAX_QUEUE_NAME_LEN: usize = 255;

/// The resolved type of a queue together with the type specific options.
#[derive(Clone, Debug, PartialEq)]
pub enum QueueKind {
    /// The type wasn't given. It behaves like a classic queue on the broker, but the options are
    /// forwarded without filtering, even the ones of other queue types.
    Unspecified {
        passive: Option<bool>,
        max_priority: Option<u32>,
        auto_delete: Option<bool>,
        queue_version: Option<u32>,
        dead_letter_strategy: Option<String>,
    },
    Classic { queue_version: Option<u32> },
    Quorum { dead_letter_strategy: Option<String> },
}

/// Canonical, validated form of [`QueueDefinitionOptions`].
#[derive(Clone, Debug, PartialEq)]
pub struct QueueDefinition {
    pub name: String,
    pub passive: bool,
    pub kind: QueueKind,
    pub queue_limit: Option<u64>,
    /// Deprecated fields which were present in the options.
    pub deprecated: Vec<DeprecatedField>,
}

impl QueueDefinition {
    /// The type the broker will create the queue with.
    pub fn queue_type(&self) -> QueueType {
        match self.kind {
            QueueKind::Unspecified { .. } | QueueKind::Classic { .. } => QueueType::Classic,
            QueueKind::Quorum { .. } => QueueType::Quorum,
        }
    }

    pub fn is_type_implicit(&self) -> bool {
        matches!(self.kind, QueueKind::Unspecified { .. })
    }
}

/// Checks if the name can be used as a queue name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return invalid_config!(None, "queue name is empty");
    }

    if name.len() > MAX_QUEUE_NAME_LEN {
        return invalid_config!(
            Some(name.to_string()),
            "queue name is longer than {} bytes",
            MAX_QUEUE_NAME_LEN
        );
    }

    Ok(())
}

/// Resolves the options to a canonical definition. Only the name is validated, other fields
/// which are not compatible with the queue type are kept here and are left out later by the
/// argument builder.
pub fn resolve(options: &QueueDefinitionOptions) -> Result<QueueDefinition> {
    validate_name(&options.unique_name)?;

    let kind = match options.queue_type {
        None => QueueKind::Unspecified {
            passive: options.passive,
            max_priority: options.max_priority,
            auto_delete: options.auto_delete,
            queue_version: options.queue_version,
            dead_letter_strategy: options.dead_letter_strategy.clone(),
        },
        Some(QueueType::Classic) => QueueKind::Classic {
            queue_version: options.queue_version,
        },
        Some(QueueType::Quorum) => QueueKind::Quorum {
            dead_letter_strategy: options.dead_letter_strategy.clone(),
        },
    };

    let mut deprecated = vec![];

    if options.auto_delete.is_some() {
        deprecated.push(DeprecatedField::AutoDelete);
    }

    if options.max_priority.is_some() {
        deprecated.push(DeprecatedField::MaxPriority);
    }

    Ok(QueueDefinition {
        name: options.unique_name.clone(),
        passive: options.passive.unwrap_or(false),
        kind,
        queue_limit: options.queue_limit,
        deprecated,
    })
}
