//! 命令执行器
//!
//! 将命令行参数转化为 Kafka 生产者、模拟器与 HTTP 服务的组装。

use std::sync::Arc;

use anyhow::{Context, Result};
use rfid_emu_shared::config::AppConfig;
use rfid_emu_shared::kafka::KafkaProducer;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::api::{self, AppState, SimulationRequest};
use crate::emitter::KafkaStatusEmitter;
use crate::simulator::StatusSimulator;

pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn build_simulator(&self, shutdown: watch::Receiver<bool>) -> Result<StatusSimulator> {
        let producer = KafkaProducer::new(&self.config.kafka).context("创建 Kafka 生产者失败")?;
        let emitter = Arc::new(KafkaStatusEmitter::new(producer));

        Ok(StatusSimulator::with_current_runtime(emitter, shutdown)?)
    }

    /// 执行 serve 命令
    ///
    /// 收到 Ctrl+C 后停止接受请求，并通知进行中的模拟在步骤边界退出。
    pub async fn run_server(&self, port: Option<u16>) -> Result<()> {

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let simulator = self.build_simulator(shutdown_rx)?;
        let state = Arc::new(AppState::new(simulator, self.config.simulation.clone()));
        let app = api::routes(state);

        let addr = self.listen_addr(port);
        let listener = TcpListener::bind(&addr).await.context("绑定端口失败")?;

        info!("状态模拟服务已启动: http://{}", addr);
        info!("  POST /api/v1/simulations - 启动模拟");
        info!("  GET  /health - 健康检查");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(true);
            })
            .await
            .context("服务器运行失败")?;

        info!("状态模拟服务已停止");
        Ok(())
    }

    /// 命令行端口优先于配置
    fn listen_addr(&self, port: Option<u16>) -> String {
        let mut config = self.config.clone();
        if let Some(port) = port {
            config.server.port = port;
        }
        config.server_addr()
    }

    /// 执行 simulate 命令
    pub async fn run_simulate(&self, request: SimulationRequest) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let simulator = self.build_simulator(shutdown_rx)?;
        let state = AppState::new(simulator, self.config.simulation.clone());

        let accepted = state.start(request)?;
        info!(
            item_id = %accepted.item_id,
            topic = %accepted.topic,
            statuses = ?accepted.statuses,
            "模拟已启动，按 Ctrl+C 停止"
        );

        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "安装 CTRL+C 信号处理器失败");
        return;
    }
    info!("收到关闭信号，正在停止...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfid_emu_shared::config::ServerConfig;

    fn runner() -> CommandRunner {
        CommandRunner::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_listen_addr_defaults_to_config() {
        assert_eq!(runner().listen_addr(None), "127.0.0.1:3000");
    }

    #[test]
    fn test_listen_addr_port_override() {
        let runner = runner();
        assert_eq!(runner.listen_addr(Some(9000)), "127.0.0.1:9000");
        // 配置本身不被修改
        assert_eq!(runner.config.server.port, 3000);
    }
}
