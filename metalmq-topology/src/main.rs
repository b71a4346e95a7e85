use anyhow::Result;
use clap::Parser;
use log::info;

use metalmq_topology::config;

/// Prints how the queues of a topology file would be defined, without connecting to a broker.
#[derive(Parser)]
#[command(name = "metalmq-topology", version, author, about)]
struct Cli {
    /// Path to the topology file
    #[arg(short, long, value_name = "FILE", default_value = "topology.toml")]
    config: String,
}

fn main() -> Result<()> {
    metalmq_topology::setup_logger();

    let cli = Cli::parse();

    let config = config::parse_config(&cli.config)?;

    info!("Planning {} queues from {}", config.queues.len(), cli.config);

    for line in config::plan_lines(&config)? {
        println!("{line}");
    }

    Ok(())
}
