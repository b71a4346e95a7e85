use std::fmt;

/// Shorthand of results where the error is a [`TopologyError`].
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors of defining queues.
///
/// Configuration errors are reported before any broker interaction. Failures coming from the
/// channel keep the original error as their cause.
#[derive(Debug)]
pub enum TopologyError {
    /// A required option is missing or malformed. `queue` is `None` if the queue cannot be
    /// identified, e.g. its name is empty.
    InvalidConfiguration { queue: Option<String>, reason: String },
    /// The channel couldn't be acquired or the broker rejected the check or declaration.
    QueueDefinitionFailed { queue: String, cause: anyhow::Error },
    /// The broker rejected an ack or nack sent through a queue handle.
    AcknowledgeFailed {
        queue: String,
        delivery_tag: u64,
        cause: anyhow::Error,
    },
}

impl TopologyError {
    /// Name of the queue the error belongs to, if it is known.
    pub fn queue(&self) -> Option<&str> {
        match self {
            TopologyError::InvalidConfiguration { queue, .. } => queue.as_deref(),
            TopologyError::QueueDefinitionFailed { queue, .. } => Some(queue),
            TopologyError::AcknowledgeFailed { queue, .. } => Some(queue),
        }
    }
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::InvalidConfiguration { queue: Some(queue), reason } => {
                write!(f, "Invalid configuration of queue {queue:?}: {reason}")
            }
            TopologyError::InvalidConfiguration { queue: None, reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            TopologyError::QueueDefinitionFailed { queue, cause } => {
                write!(f, "Defining queue {queue:?} failed: {cause}")
            }
            TopologyError::AcknowledgeFailed {
                queue,
                delivery_tag,
                cause,
            } => write!(f, "Acknowledging delivery {delivery_tag} of queue {queue:?} failed: {cause}"),
        }
    }
}

impl std::error::Error for TopologyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TopologyError::InvalidConfiguration { .. } => None,
            TopologyError::QueueDefinitionFailed { cause, .. } | TopologyError::AcknowledgeFailed { cause, .. } => {
                Some(&**cause)
            }
        }
    }
}

/// Shorthand for returning configuration errors.
#[macro_export]
macro_rules! invalid_config {
    ($queue:expr, $($arg:tt)+) => {
        ::std::result::Result::Err($crate::TopologyError::InvalidConfiguration {
            queue: $queue,
            reason: ::std::format!($($arg)+),
        })
    };
}
