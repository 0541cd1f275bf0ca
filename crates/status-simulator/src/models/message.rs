//! 状态消息
//!
//! 每次发送都构造一条新的消息，时间戳取构造时刻的 UTC 时间。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductStatus;

/// 发往下游的商品状态变更消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub item_id: String,
    pub article: i64,
    /// 状态的线上取值，如 `IN_TRANSIT`
    pub product_status: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusMessage {
    /// 根据商品标识和状态构造消息
    pub fn create(item_id: &str, article: i64, status: ProductStatus) -> Self {
        Self {
            item_id: item_id.to_string(),
            article,
            product_status: status.value().to_string(),
            timestamp: Utc::now(),
        }
    }
}
