use log::info;
use std::collections::HashSet;
use std::sync::Arc;

use crate::channel::Connection;
use crate::model::QueueDefinitionOptions;
use crate::queue::{QueueDefiner, QueueHandle};
use crate::resolver::validate_name;
use crate::{invalid_config, Result};

/// The set of queues defined over one connection.
#[derive(Clone)]
pub struct Topology {
    connection: Arc<dyn Connection>,
}

impl Topology {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Topology { connection }
    }

    pub fn connection(&self) -> Arc<dyn Connection> {
        Arc::clone(&self.connection)
    }

    /// Defines the queues one after the other and returns their handles in the same order.
    ///
    /// All the options are validated before the first broker call. The definition stops at the
    /// first failing queue, queues defined before that are not rolled back.
    pub async fn define_queues<S>(
        &self,
        queues: Vec<QueueDefinitionOptions>,
        serializers: Arc<S>,
    ) -> Result<Vec<QueueHandle<S>>> {
        validate_queues(&queues)?;

        let mut definers = Vec::with_capacity(queues.len());

        for options in queues {
            definers.push(QueueDefiner::new(options, self, Arc::clone(&serializers))?);
        }

        let mut handles = Vec::with_capacity(definers.len());

        for definer in definers {
            handles.push(definer.define().await?);
        }

        info!("{} queues are defined", handles.len());

        Ok(handles)
    }
}

/// Checks that all the queue names are valid and unique.
pub fn validate_queues(queues: &[QueueDefinitionOptions]) -> Result<()> {
    let mut names = HashSet::new();

    for options in queues {
        validate_name(&options.unique_name)?;

        if !names.insert(options.unique_name.as_str()) {
            return invalid_config!(
                Some(options.unique_name.clone()),
                "queue is defined more than once"
            );
        }
    }

    Ok(())
}
