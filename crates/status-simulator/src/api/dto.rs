//! 请求与响应 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ProductStatus;
use crate::strategy::StrategyType;

/// 启动模拟请求
///
/// 显式给出的非空 `statuses` 优先于 `strategy`；两者都缺省时使用完整序列。
/// `topic` 与超时区间缺省时取配置值。
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[validate(length(min = 1, max = 128, message = "itemId 长度必须在1-128个字符之间"))]
    pub item_id: String,
    #[validate(range(min = 0, message = "article 不能为负数"))]
    pub article: i64,
    pub topic: Option<String>,
    pub statuses: Option<Vec<ProductStatus>>,
    pub strategy: Option<StrategyType>,
    pub min_timeout_minutes: Option<i32>,
    pub max_timeout_minutes: Option<i32>,
}

/// 启动结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationAccepted {
    pub item_id: String,
    pub topic: String,
    /// 实际将按此顺序发送（遇到第一个终态即停止）
    pub statuses: Vec<ProductStatus>,
}

/// 统一响应包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn accepted(data: T) -> Self {
        Self {
            success: true,
            code: "ACCEPTED".to_string(),
            message: "模拟已启动".to_string(),
            data: Some(data),
        }
    }
}
