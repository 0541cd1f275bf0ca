//! 内置的状态序列

use super::{StateSequenceStrategy, StrategyType};
use crate::models::ProductStatus;

/// 完整序列：全部状态按声明顺序
///
/// 模拟在遇到的第一个终态处停止，因此实际只会走到 `DELIVERED`。
#[derive(Debug, Clone, Copy, Default)]
pub struct FullSequenceStrategy;

impl StateSequenceStrategy for FullSequenceStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Full
    }

    fn build_sequence(&self) -> Vec<ProductStatus> {
        ProductStatus::ALL.to_vec()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressSequenceStrategy;

impl StateSequenceStrategy for ExpressSequenceStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Express
    }

    fn build_sequence(&self) -> Vec<ProductStatus> {
        vec![
            ProductStatus::Created,
            ProductStatus::Shipped,
            ProductStatus::Delivered,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LostInTransitStrategy;

impl StateSequenceStrategy for LostInTransitStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::LostInTransit
    }

    fn build_sequence(&self) -> Vec<ProductStatus> {
        vec![
            ProductStatus::Created,
            ProductStatus::Tagged,
            ProductStatus::Shipped,
            ProductStatus::InTransit,
            ProductStatus::Lost,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnedStrategy;

impl StateSequenceStrategy for ReturnedStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Returned
    }

    fn build_sequence(&self) -> Vec<ProductStatus> {
        vec![
            ProductStatus::Created,
            ProductStatus::Shipped,
            ProductStatus::InTransit,
            ProductStatus::Arrived,
            ProductStatus::Returned,
        ]
    }
}
