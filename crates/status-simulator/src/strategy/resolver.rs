//! 状态序列解析
//!
//! 请求中给出非空序列时原样使用，否则回退到 `FULL` 策略的序列。

use std::borrow::Cow;

use super::{StateSequenceStrategyFactory, StrategyType};
use crate::models::ProductStatus;

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceResolver {
    factory: StateSequenceStrategyFactory,
}

impl SequenceResolver {
    /// 返回实际要发送的状态序列，不修改输入
    pub fn resolve<'a>(&self, statuses: &'a [ProductStatus]) -> Cow<'a, [ProductStatus]> {
        if statuses.is_empty() {
            Cow::Owned(self.default_sequence())
        } else {
            Cow::Borrowed(statuses)
        }
    }

    pub fn default_sequence(&self) -> Vec<ProductStatus> {
        self.factory
            .get_strategy(StrategyType::Full)
            .build_sequence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_sequence_is_returned_unchanged() {
        let resolver = SequenceResolver::default();
        let explicit = vec![ProductStatus::Shipped, ProductStatus::Lost];

        let resolved = resolver.resolve(&explicit);

        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(resolved.as_ref(), explicit.as_slice());
    }

    #[test]
    fn test_empty_sequence_falls_back_to_full() {
        let resolver = SequenceResolver::default();

        let resolved = resolver.resolve(&[]);

        assert_eq!(resolved.as_ref(), ProductStatus::ALL.as_slice());
        assert_eq!(resolved[0], ProductStatus::Created);
    }
}
