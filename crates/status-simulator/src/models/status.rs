//! 商品状态枚举
//!
//! 声明顺序即完整状态序列的顺序，`FULL` 策略直接使用 [`ProductStatus::ALL`]。

use std::fmt;
use std::str::FromStr;

use rfid_emu_shared::error::EmuError;
use serde::{Deserialize, Serialize};

/// 被追踪商品的状态
///
/// 终态（`is_final`）发出并确认后，该商品的模拟结束。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// 商品入库登记
    Created,
    /// 已贴 RFID 标签
    Tagged,
    /// 进入仓库
    Warehoused,
    /// 已出库发运
    Shipped,
    /// 运输途中
    InTransit,
    /// 到达目的站点
    Arrived,
    /// 已签收（终态）
    Delivered,
    /// 已退回（终态）
    Returned,
    /// 已丢失（终态）
    Lost,
}

impl ProductStatus {
    /// 全部状态，按声明顺序排列
    pub const ALL: [ProductStatus; 9] = [
        Self::Created,
        Self::Tagged,
        Self::Warehoused,
        Self::Shipped,
        Self::InTransit,
        Self::Arrived,
        Self::Delivered,
        Self::Returned,
        Self::Lost,
    ];

    /// 线上传输使用的状态值
    pub fn value(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Tagged => "TAGGED",
            Self::Warehoused => "WAREHOUSED",
            Self::Shipped => "SHIPPED",
            Self::InTransit => "IN_TRANSIT",
            Self::Arrived => "ARRIVED",
            Self::Delivered => "DELIVERED",
            Self::Returned => "RETURNED",
            Self::Lost => "LOST",
        }
    }

    /// 是否为终态
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Returned | Self::Lost)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ProductStatus {
    type Err = EmuError;

    /// 大小写不敏感，`in-transit` 与 `IN_TRANSIT` 等价
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.value() == normalized)
            .ok_or_else(|| EmuError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = ProductStatus::ALL
            .into_iter()
            .filter(ProductStatus::is_final)
            .collect();
        assert_eq!(
            terminal,
            vec![
                ProductStatus::Delivered,
                ProductStatus::Returned,
                ProductStatus::Lost
            ]
        );
    }

    #[test]
    fn test_serde_matches_wire_value() {
        for status in ProductStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.value()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "in-transit".parse::<ProductStatus>().unwrap(),
            ProductStatus::InTransit
        );
        assert_eq!(
            " Delivered ".parse::<ProductStatus>().unwrap(),
            ProductStatus::Delivered
        );
        assert!("teleported".parse::<ProductStatus>().is_err());
    }
}
