//! 模拟上下文
//!
//! `SimulationContext` 与 `TimeoutSettingContext` 在一次模拟启动时创建，之后只读。
//! 每一步以不可变的 [`SimulationStep`] 传入下一次调度，游标随新记录前进，
//! 不需要任何共享的可变计数器。

use std::sync::Arc;

use super::{ProductStatus, StatusMessage};

/// 单个商品的模拟请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationContext {
    pub item_id: String,
    pub article: i64,
    pub topic: String,
    /// 为空时使用默认的完整状态序列
    pub statuses: Vec<ProductStatus>,
}

impl SimulationContext {
    pub fn new(
        item_id: impl Into<String>,
        article: i64,
        topic: impl Into<String>,
        statuses: Vec<ProductStatus>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            article,
            topic: topic.into(),
            statuses,
        }
    }

    /// Kafka 消息 key：商品货号的字符串形式
    pub fn message_key(&self) -> String {
        self.article.to_string()
    }
}

/// 相邻两步之间的延迟区间（分钟）
///
/// 上下界的先后不做假设，使用时重新取 min/max。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSettingContext {
    pub min_timeout_minutes: i32,
    pub max_timeout_minutes: i32,
}

impl TimeoutSettingContext {
    pub fn new(min_timeout_minutes: i32, max_timeout_minutes: i32) -> Self {
        Self {
            min_timeout_minutes,
            max_timeout_minutes,
        }
    }
}

/// 一次模拟中的单步记录
///
/// 同一模拟的各步严格串行，游标只由当前持有该记录的任务读取。
#[derive(Debug, Clone)]
pub struct SimulationStep {
    pub context: Arc<SimulationContext>,
    pub timeouts: TimeoutSettingContext,
    pub cursor: i64,
}

impl SimulationStep {
    /// 从游标 0 开始的第一步
    pub fn first(context: Arc<SimulationContext>, timeouts: TimeoutSettingContext) -> Self {
        Self::at(context, timeouts, 0)
    }

    pub fn at(context: Arc<SimulationContext>, timeouts: TimeoutSettingContext, cursor: i64) -> Self {
        Self {
            context,
            timeouts,
            cursor,
        }
    }

    /// 游标加一后的下一步
    pub fn next(self) -> Self {
        Self {
            cursor: self.cursor + 1,
            ..self
        }
    }
}

/// 单次发送与其确认回调之间的关联记录
///
/// 回调执行完毕后即被丢弃。
#[derive(Debug, Clone)]
pub struct MessageSendContext {
    pub topic: String,
    pub key: String,
    pub message: StatusMessage,
    pub status: ProductStatus,
    pub step: SimulationStep,
}

impl MessageSendContext {
    /// 为当前步骤和状态构造发送记录，消息在此时生成
    pub fn new(step: SimulationStep, status: ProductStatus) -> Self {
        let context = &step.context;
        let message = StatusMessage::create(&context.item_id, context.article, status);

        Self {
            topic: context.topic.clone(),
            key: context.message_key(),
            message,
            status,
            step,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.step.context.item_id
    }
}
