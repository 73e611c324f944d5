use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use quasar_sensor::{Config, SnapshotFile};

#[derive(Parser)]
struct Args {
    /// MQTT broker address
    mqtt_addr: String,

    /// Include rules (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Device list snapshot (JSON), re-read on every poll
    #[arg(short, long)]
    devices: PathBuf,

    /// Seconds between refreshes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval: u64,

    /// MQTT client id
    #[arg(long, default_value = quasar_sensor::bridge::PROVIDER)]
    client_id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quasar_host::log::init();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .await
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;

    let source = SnapshotFile::new(&args.devices);

    quasar_sensor::bridge(
        &args.mqtt_addr,
        &args.client_id,
        &config,
        &source,
        Duration::from_secs(args.poll_interval),
    )
    .await
    .context("sensor bridge stopped")
}
