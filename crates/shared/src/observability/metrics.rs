//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。
//! 未安装 recorder 时，下面的记录函数都是空操作。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(service_name: &str, port: u16) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册模拟器相关指标的描述
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!(
        "status_simulations_started_total",
        "Total number of started status simulations"
    );
    metrics::describe_counter!(
        "status_messages_emitted_total",
        "Total number of status messages handed to the emitter"
    );
    metrics::describe_counter!(
        "status_simulations_finished_total",
        "Total number of finished status simulations by outcome"
    );
    metrics::describe_histogram!(
        "status_step_delay_seconds",
        "Randomized delay scheduled between two status steps"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 指标端点路由，`/metrics` 渲染给定 handle 中的指标
fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }))
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = metrics_router(handle);

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录一次模拟启动
#[inline]
pub fn record_simulation_started() {
    metrics::counter!("status_simulations_started_total").increment(1);
}

/// 记录单条状态消息的发送结果（success / failure）
#[inline]
pub fn record_status_emission(status: &str, outcome: &str) {
    metrics::counter!(
        "status_messages_emitted_total",
        "status" => status.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// 记录两步之间调度的延迟
#[inline]
pub fn record_step_delay(delay_secs: f64) {
    metrics::histogram!("status_step_delay_seconds").record(delay_secs);
}

/// 记录模拟结束
#[inline]
pub fn record_simulation_finished(outcome: &str) {
    metrics::counter!(
        "status_simulations_finished_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_metrics_route_renders_recorded_metrics() {
        // 局部 recorder，不影响全局
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            record_simulation_finished("completed");
        });

        let response = metrics_router(handle)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("status_simulations_finished_total"));
        assert!(text.contains("outcome=\"completed\""));
    }
}
