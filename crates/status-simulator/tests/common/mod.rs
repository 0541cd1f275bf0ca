//! 集成测试共用的记录型发送器

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rfid_emu_shared::error::EmuError;
use status_simulator::emitter::{DeliveryReceipt, StatusEmitter};
use status_simulator::models::StatusMessage;
use status_simulator::simulator::StatusSimulator;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// 一次发送尝试（无论成功与否）
#[derive(Debug, Clone)]
pub struct Emission {
    pub topic: String,
    pub key: String,
    pub message: StatusMessage,
    pub at: Instant,
}

/// 把每次发送推入 channel 的发送器，`fail_on` 为从 0 开始的调用序号
pub struct RecordingEmitter {
    tx: mpsc::UnboundedSender<Emission>,
    fail_on: Option<usize>,
    calls: AtomicUsize,
}

impl RecordingEmitter {
    pub fn new(fail_on: Option<usize>) -> (Self, mpsc::UnboundedReceiver<Emission>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emitter = Self {
            tx,
            fail_on,
            calls: AtomicUsize::new(0),
        };
        (emitter, rx)
    }
}

#[async_trait]
impl StatusEmitter for RecordingEmitter {
    async fn emit(
        &self,
        topic: &str,
        key: &str,
        message: &StatusMessage,
    ) -> Result<DeliveryReceipt, EmuError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(Emission {
            topic: topic.to_string(),
            key: key.to_string(),
            message: message.clone(),
            at: Instant::now(),
        });

        if self.fail_on == Some(index) {
            return Err(EmuError::Kafka("broker unavailable".to_string()));
        }
        Ok(DeliveryReceipt {
            partition: 0,
            offset: index as i64,
        })
    }
}

/// 在当前运行时上创建带记录发送器的模拟器
pub fn recording_simulator(
    fail_on: Option<usize>,
) -> (
    StatusSimulator,
    mpsc::UnboundedReceiver<Emission>,
    watch::Sender<bool>,
) {
    let (emitter, rx) = RecordingEmitter::new(fail_on);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let simulator = StatusSimulator::with_current_runtime(Arc::new(emitter), shutdown_rx)
        .expect("测试运行在 tokio 运行时中");
    (simulator, rx, shutdown_tx)
}
