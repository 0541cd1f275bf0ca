//! 状态消息发送抽象
//!
//! 模拟驱动只依赖 [`StatusEmitter`]，生产环境使用 Kafka 实现，测试中替换为 mock。

use async_trait::async_trait;
use rfid_emu_shared::error::EmuError;
use rfid_emu_shared::kafka::KafkaProducer;
use tracing::debug;

use crate::models::StatusMessage;

/// 发送确认
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub partition: i32,
    pub offset: i64,
}

/// 状态消息发送器
///
/// 发送是异步的，失败只通过返回的 `Err` 体现。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusEmitter: Send + Sync {
    async fn emit(
        &self,
        topic: &str,
        key: &str,
        message: &StatusMessage,
    ) -> Result<DeliveryReceipt, EmuError>;
}

/// 基于 Kafka 的发送器，消息以 JSON 发送
#[derive(Clone)]
pub struct KafkaStatusEmitter {
    producer: KafkaProducer,
}

impl KafkaStatusEmitter {
    pub fn new(producer: KafkaProducer) -> Self {
        Self { producer }
    }
}

#[async_trait]
impl StatusEmitter for KafkaStatusEmitter {
    async fn emit(
        &self,
        topic: &str,
        key: &str,
        message: &StatusMessage,
    ) -> Result<DeliveryReceipt, EmuError> {
        let (partition, offset) = self.producer.send_json(topic, key, message).await?;

        debug!(
            item_id = %message.item_id,
            status = %message.product_status,
            partition,
            offset,
            "状态消息已投递"
        );
        Ok(DeliveryReceipt { partition, offset })
    }
}
