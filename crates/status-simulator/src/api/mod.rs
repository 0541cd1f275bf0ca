//! HTTP 接口
//!
//! - `POST /api/v1/simulations` 启动一次状态模拟（fire-and-forget，返回 202）
//! - `GET /health` 健康检查

pub mod dto;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rfid_emu_shared::config::SimulationConfig;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::error::Result;
use crate::models::{SimulationContext, TimeoutSettingContext};
use crate::simulator::StatusSimulator;
use crate::strategy::StateSequenceStrategyFactory;

pub use dto::{ApiResponse, SimulationAccepted, SimulationRequest};

/// 路由共享状态
pub struct AppState {
    pub simulator: StatusSimulator,
    pub defaults: SimulationConfig,
    pub strategies: StateSequenceStrategyFactory,
}

impl AppState {
    pub fn new(simulator: StatusSimulator, defaults: SimulationConfig) -> Self {
        Self {
            simulator,
            defaults,
            strategies: StateSequenceStrategyFactory::new(),
        }
    }

    /// 校验请求并启动模拟
    pub fn start(&self, request: SimulationRequest) -> Result<SimulationAccepted> {
        request.validate()?;

        let (context, timeouts) = build_simulation(request, &self.defaults, &self.strategies);
        let accepted = SimulationAccepted {
            item_id: context.item_id.clone(),
            topic: context.topic.clone(),
            statuses: self.simulator.resolve_statuses(&context.statuses),
        };

        self.simulator.simulate(context, timeouts);
        Ok(accepted)
    }
}

/// 将请求与默认配置合并为模拟上下文
///
/// 显式非空序列优先，其次是命名策略，都没有时留空由驱动回退到完整序列。
pub fn build_simulation(
    request: SimulationRequest,
    defaults: &SimulationConfig,
    strategies: &StateSequenceStrategyFactory,
) -> (SimulationContext, TimeoutSettingContext) {
    let statuses = match (request.statuses, request.strategy) {
        (Some(statuses), _) if !statuses.is_empty() => statuses,
        (_, Some(kind)) => strategies.get_strategy(kind).build_sequence(),
        _ => Vec::new(),
    };

    let topic = request
        .topic
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| defaults.default_topic.clone());

    let timeouts = TimeoutSettingContext::new(
        request
            .min_timeout_minutes
            .unwrap_or(defaults.min_timeout_minutes),
        request
            .max_timeout_minutes
            .unwrap_or(defaults.max_timeout_minutes),
    );

    (
        SimulationContext::new(request.item_id, request.article, topic, statuses),
        timeouts,
    )
}

/// 构建路由
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/simulations", post(start_simulation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn start_simulation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SimulationAccepted>>)> {
    let accepted = state.start(request)?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::accepted(accepted))))
}
