//! Stockroom server binary.

use anyhow::{Context, Result};
use sr_03_api_gateway::ServiceConfig;
use stock_runtime::shutdown::shutdown_signal;
use stock_runtime::telemetry::{init_tracing, TelemetryConfig};
use stock_runtime::StockRuntime;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::from_env())?;

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    info!(
        addr = %config.http_addr(),
        version = sr_03_api_gateway::VERSION,
        "Starting stockroom"
    );

    StockRuntime::build(config)?.run(shutdown_signal()).await
}
