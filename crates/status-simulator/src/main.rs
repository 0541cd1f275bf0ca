//! 商品状态模拟器入口

use anyhow::Context;
use clap::Parser;
use rfid_emu_shared::config::AppConfig;
use rfid_emu_shared::observability;
use status_simulator::cli::{Cli, CommandRunner, Commands};

const SERVICE_NAME: &str = "status-simulator";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config_dir {
        Some(dir) => {
            let env = std::env::var("EMU_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load_from(std::path::Path::new(dir), &env, SERVICE_NAME)
        }
        None => AppConfig::load(SERVICE_NAME),
    }
    .context("加载配置失败")?;

    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Serve { port } => runner.run_server(port).await?,
        command @ Commands::Simulate { .. } => {
            if let Some(request) = command.into_simulation_request() {
                runner.run_simulate(request).await?;
            }
        }
    }

    Ok(())
}
