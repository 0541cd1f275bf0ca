//! Kafka 基础设施封装
//!
//! 将 rdkafka 的底层 API 封装为业务友好的 Producer 抽象，
//! 统一消息序列化和错误映射。

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::KafkaConfig;
use crate::error::EmuError;

// ---------------------------------------------------------------------------
// Topic 常量
// ---------------------------------------------------------------------------

/// 集中管理 Kafka topic 名称，防止字符串散落在各处导致拼写不一致
pub mod topics {
    pub const PRODUCT_STATUS: &str = "rfid.product.status";
}

// ---------------------------------------------------------------------------
// KafkaProducer
// ---------------------------------------------------------------------------

/// 面向业务的 Kafka 生产者
///
/// 封装 `FutureProducer` 并提供类型安全的 JSON 发送方法，
/// 内部已派生 Clone（`FutureProducer` 本身是 Arc 包装的），可被任意多个模拟并发使用。
#[derive(Clone)]
pub struct KafkaProducer {
    producer: FutureProducer,
    queue_timeout: Duration,
}

impl KafkaProducer {
    /// 根据配置创建生产者
    pub fn new(config: &KafkaConfig) -> Result<Self, EmuError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("client.id", &config.client_id)
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            .create()
            .map_err(|e| EmuError::Kafka(format!("创建生产者失败: {e}")))?;

        info!(brokers = %config.brokers, client_id = %config.client_id, "Kafka 生产者已初始化");
        Ok(Self {
            producer,
            queue_timeout: Duration::from_millis(config.message_timeout_ms),
        })
    }

    /// 发送原始字节消息，返回 (partition, offset)
    pub async fn send(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(i32, i64), EmuError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        let delivery = self
            .producer
            .send(record, self.queue_timeout)
            .await
            .map_err(|(e, _)| EmuError::Kafka(format!("发送消息失败: {e}")))?;

        debug!(
            topic,
            key,
            partition = delivery.partition,
            offset = delivery.offset,
            "消息已发送"
        );
        Ok((delivery.partition, delivery.offset))
    }

    /// 将值序列化为 JSON 后发送
    ///
    /// 序列化与网络发送拆分为两步，便于独立定位故障原因。
    pub async fn send_json<T: Serialize>(
        &self,
        topic: &str,
        key: &str,
        value: &T,
    ) -> Result<(i32, i64), EmuError> {
        let payload = serde_json::to_vec(value)?;

        self.send(topic, key, &payload).await
    }
}
