//! 状态序列策略
//!
//! 每种 [`StrategyType`] 对应一条预定义的状态序列。
//! 模拟请求未显式给出序列时，由 [`SequenceResolver`] 回退到 `FULL` 策略。

mod resolver;
mod sequences;

pub use resolver::SequenceResolver;
pub use sequences::{
    ExpressSequenceStrategy, FullSequenceStrategy, LostInTransitStrategy, ReturnedStrategy,
};

use std::str::FromStr;

use rfid_emu_shared::error::EmuError;
use serde::{Deserialize, Serialize};

use crate::models::ProductStatus;

/// 预定义序列的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyType {
    /// 全部状态按声明顺序
    Full,
    /// 跳过仓储与中转环节的快速签收
    Express,
    /// 运输途中丢失
    LostInTransit,
    /// 到达后被退回
    Returned,
}

impl StrategyType {
    pub const ALL: [StrategyType; 4] = [
        Self::Full,
        Self::Express,
        Self::LostInTransit,
        Self::Returned,
    ];

    /// 与 JSON 表示一致的名称
    pub fn value(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Express => "EXPRESS",
            Self::LostInTransit => "LOST_IN_TRANSIT",
            Self::Returned => "RETURNED",
        }
    }
}

impl FromStr for StrategyType {
    type Err = EmuError;

    /// 大小写不敏感，`lost-in-transit` 与 `LOST_IN_TRANSIT` 等价
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.value() == normalized)
            .ok_or_else(|| EmuError::UnknownStrategy(s.to_string()))
    }
}

/// 状态序列生成策略
pub trait StateSequenceStrategy: Send + Sync {
    fn strategy_type(&self) -> StrategyType;

    /// 生成有序的状态序列，保证非空
    fn build_sequence(&self) -> Vec<ProductStatus>;
}

/// 按种类查找策略
///
/// 所有种类都有内置实现，查找不会失败。
#[derive(Debug, Clone, Copy, Default)]
pub struct StateSequenceStrategyFactory;

impl StateSequenceStrategyFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_strategy(&self, kind: StrategyType) -> &'static dyn StateSequenceStrategy {
        match kind {
            StrategyType::Full => &FullSequenceStrategy,
            StrategyType::Express => &ExpressSequenceStrategy,
            StrategyType::LostInTransit => &LostInTransitStrategy,
            StrategyType::Returned => &ReturnedStrategy,
        }
    }
}
