use anyhow::Result;
use serde_derive::Deserialize;
use std::path::Path;

use crate::model::QueueDefinitionOptions;
use crate::queue::{self, Operation};
use crate::resolver;

/// Queue definitions of a topology file.
///
/// ```toml
/// [[queue]]
/// uniqueName = "orders"
/// type = "quorum"
/// queueLimit = 1000
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyConfig {
    #[serde(rename = "queue", default)]
    pub queues: Vec<QueueDefinitionOptions>,
}

impl TopologyConfig {
    pub fn from_toml(cfg: &str) -> Result<Self> {
        Ok(toml::from_str(cfg)?)
    }
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> Result<TopologyConfig> {
    let cfg = std::fs::read_to_string(path)?;

    TopologyConfig::from_toml(&cfg)
}

/// Renders how a queue would be defined: `<name> check` or `<name> assert <json arguments>`.
pub fn plan_line(options: &QueueDefinitionOptions) -> Result<String> {
    let definition = resolver::resolve(options)?;

    match queue::plan(&definition) {
        Operation::Check => Ok(format!("{} check", definition.name)),
        Operation::Assert(args) => Ok(format!("{} assert {}", definition.name, serde_json::to_string(&args)?)),
    }
}

/// Renders the plan of every queue in order. The names are validated first, so an invalid
/// topology gives no lines at all.
pub fn plan_lines(config: &TopologyConfig) -> Result<Vec<String>> {
    crate::validate_queues(&config.queues)?;

    config.queues.iter().map(plan_line).collect()
}
