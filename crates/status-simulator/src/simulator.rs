//! 状态模拟驱动
//!
//! 对单个商品按序发送状态消息：解析序列 → 构造消息 → 发送 → 确认后调度下一步或结束。
//!
//! 每一步都以新的 tokio 任务执行，发送确认和步间延迟都不阻塞线程：
//! - 发送任务 `.await` 发送器返回的 future，在完成回调中决定后续动作；
//! - 非终态确认后，另起任务 `sleep` 随机延迟，再以游标 +1 的新步骤记录重新进入。
//!
//! 同一模拟的各步严格串行，不同模拟之间互不协调，只共享运行时与发送器。

use std::sync::Arc;

use rfid_emu_shared::error::{EmuError, Result};
use rfid_emu_shared::observability::metrics;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::delay::calculate_delay;
use crate::emitter::{DeliveryReceipt, StatusEmitter};
use crate::models::{
    MessageSendContext, ProductStatus, SimulationContext, SimulationStep, TimeoutSettingContext,
};
use crate::strategy::SequenceResolver;

/// 模拟结束方式，用于日志与指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// 终态已发送并确认
    Completed,
    /// 某一步发送失败
    Failed,
    /// 序列中没有终态，游标越过末尾
    Exhausted,
    /// 步间检测到关闭信号
    Cancelled,
}

impl SimulationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
        }
    }
}

/// 状态模拟器
///
/// 可廉价克隆，所有克隆共享同一发送器与运行时。
#[derive(Clone)]
pub struct StatusSimulator {
    inner: Arc<SimulatorInner>,
}

struct SimulatorInner {
    emitter: Arc<dyn StatusEmitter>,
    resolver: SequenceResolver,
    runtime: Handle,
    shutdown: watch::Receiver<bool>,
}

impl StatusSimulator {
    /// 创建模拟器
    ///
    /// `shutdown` 变为 `true` 后，所有模拟在下一个步骤边界停止。
    pub fn new(
        emitter: Arc<dyn StatusEmitter>,
        runtime: Handle,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            inner: Arc::new(SimulatorInner {
                emitter,
                resolver: SequenceResolver::default(),
                runtime,
                shutdown,
            }),
        }
    }

    /// 使用当前 tokio 运行时创建模拟器
    pub fn with_current_runtime(
        emitter: Arc<dyn StatusEmitter>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| EmuError::Internal(format!("未在 tokio 运行时中创建模拟器: {e}")))?;
        Ok(Self::new(emitter, runtime, shutdown))
    }

    /// 启动一次模拟，立即返回
    ///
    /// 结果只通过日志与指标体现，不向调用方返回。
    pub fn simulate(&self, context: SimulationContext, timeouts: TimeoutSettingContext) {
        info!(
            item_id = %context.item_id,
            article = context.article,
            topic = %context.topic,
            explicit_statuses = context.statuses.len(),
            min_timeout_minutes = timeouts.min_timeout_minutes,
            max_timeout_minutes = timeouts.max_timeout_minutes,
            "开始状态模拟"
        );
        metrics::record_simulation_started();

        let step = SimulationStep::first(Arc::new(context), timeouts);
        Arc::clone(&self.inner).process_statuses(step);
    }

    /// 返回给定序列实际会使用的状态序列
    pub fn resolve_statuses(&self, statuses: &[ProductStatus]) -> Vec<ProductStatus> {
        self.inner.resolver.resolve(statuses).into_owned()
    }
}

impl SimulatorInner {
    /// 执行游标所指的一步
    fn process_statuses(self: Arc<Self>, step: SimulationStep) {
        if self.is_shutting_down() {
            info!(
                item_id = %step.context.item_id,
                cursor = step.cursor,
                "收到关闭信号，停止模拟"
            );
            metrics::record_simulation_finished(SimulationOutcome::Cancelled.as_str());
            return;
        }

        let Some(status) = self.current_status(&step) else {
            debug!(
                item_id = %step.context.item_id,
                cursor = step.cursor,
                "状态序列已走完"
            );
            metrics::record_simulation_finished(SimulationOutcome::Exhausted.as_str());
            return;
        };

        let send = MessageSendContext::new(step, status);
        let runtime = self.runtime.clone();
        runtime.spawn(self.send_message_with_callback(send));
    }

    /// 游标越界（< 0 或 >= 长度）时返回 None
    fn current_status(&self, step: &SimulationStep) -> Option<ProductStatus> {
        let statuses = self.resolver.resolve(&step.context.statuses);
        usize::try_from(step.cursor)
            .ok()
            .and_then(|index| statuses.get(index).copied())
    }

    async fn send_message_with_callback(self: Arc<Self>, send: MessageSendContext) {
        debug!(
            item_id = %send.item_id(),
            status = %send.status,
            cursor = send.step.cursor,
            topic = %send.topic,
            key = %send.key,
            "发送状态消息"
        );

        let result = self
            .emitter
            .emit(&send.topic, &send.key, &send.message)
            .await;

        self.on_send_complete(send, result);
    }

    fn on_send_complete(
        self: Arc<Self>,
        send: MessageSendContext,
        result: Result<DeliveryReceipt>,
    ) {
        let status = send.status;

        match result {
            Ok(receipt) => {
                debug!(
                    item_id = %send.item_id(),
                    status = %status,
                    partition = receipt.partition,
                    offset = receipt.offset,
                    "状态消息已确认"
                );
                metrics::record_status_emission(status.value(), "success");
            }
            Err(e) => {
                error!(
                    item_id = %send.item_id(),
                    status = %status,
                    error = %e,
                    retryable = e.is_retryable(),
                    "状态消息发送失败，模拟终止"
                );
                metrics::record_status_emission(status.value(), "failure");
                metrics::record_simulation_finished(SimulationOutcome::Failed.as_str());
                return;
            }
        }

        if status.is_final() {
            info!(item_id = %send.item_id(), status = %status, "状态序列已完成");
            metrics::record_simulation_finished(SimulationOutcome::Completed.as_str());
            return;
        }

        self.schedule_next_status(send.step);
    }

    /// 随机延迟后以游标 +1 重新进入
    fn schedule_next_status(self: Arc<Self>, step: SimulationStep) {
        if self.is_shutting_down() {
            info!(item_id = %step.context.item_id, "收到关闭信号，不再调度下一状态");
            metrics::record_simulation_finished(SimulationOutcome::Cancelled.as_str());
            return;
        }

        let timeouts = step.timeouts;
        let delay = calculate_delay(timeouts.min_timeout_minutes, timeouts.max_timeout_minutes);

        debug!(
            item_id = %step.context.item_id,
            next_cursor = step.cursor + 1,
            delay = ?delay,
            "已调度下一状态"
        );
        metrics::record_step_delay(delay.as_secs_f64());

        let runtime = self.runtime.clone();
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            self.process_statuses(step.next());
        });
    }

    fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::MockStatusEmitter;
    use crate::models::StatusMessage;
    use std::sync::Mutex;
    use std::time::Duration;

    type Sent = Arc<Mutex<Vec<StatusMessage>>>;

    /// 足以覆盖任意多个 1 分钟档位步骤的虚拟时间
    const LONG_WAIT: Duration = Duration::from_secs(6 * 60 * 60);

    /// 记录每次发送的 mock；`fail_on` 为从 0 开始的调用序号
    fn recording_emitter(fail_on: Option<usize>) -> (MockStatusEmitter, Sent) {
        let sent: Sent = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&sent);

        let mut emitter = MockStatusEmitter::new();
        emitter.expect_emit().returning(move |_topic, _key, message| {
            let mut guard = recorded.lock().unwrap();
            let index = guard.len();
            guard.push(message.clone());
            if fail_on == Some(index) {
                Err(EmuError::Kafka("broker unavailable".to_string()))
            } else {
                Ok(DeliveryReceipt {
                    partition: 0,
                    offset: index as i64,
                })
            }
        });

        (emitter, sent)
    }

    fn build_simulator(emitter: MockStatusEmitter) -> (StatusSimulator, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let simulator = StatusSimulator::with_current_runtime(Arc::new(emitter), rx).unwrap();
        (simulator, tx)
    }

    fn context(statuses: Vec<ProductStatus>) -> SimulationContext {
        SimulationContext::new("ITM-1", 42, "rfid.product.status", statuses)
    }

    fn sent_statuses(sent: &Sent) -> Vec<String> {
        sent.lock()
            .unwrap()
            .iter()
            .map(|m| m.product_status.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_up_to_first_terminal_status() {
        use ProductStatus::*;

        let cases = vec![
            (vec![Created, Shipped, Delivered], 3),
            (vec![Created, Delivered, Shipped], 2),
            (vec![Lost], 1),
            (vec![Created, Tagged, Shipped], 3),
            (vec![Shipped, Returned, Lost, Delivered], 2),
        ];

        for (statuses, expected) in cases {
            let (emitter, sent) = recording_emitter(None);
            let (simulator, _tx) = build_simulator(emitter);

            simulator.simulate(context(statuses.clone()), TimeoutSettingContext::new(1, 1));
            tokio::time::sleep(LONG_WAIT).await;

            assert_eq!(sent.lock().unwrap().len(), expected, "序列 {statuses:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_cursor_emits_nothing() {
        let statuses = vec![ProductStatus::Created, ProductStatus::Delivered];
        let len = statuses.len() as i64;

        for cursor in [-1, len, len + 1] {
            let (emitter, sent) = recording_emitter(None);
            let (simulator, _tx) = build_simulator(emitter);

            let step = SimulationStep::at(
                Arc::new(context(statuses.clone())),
                TimeoutSettingContext::new(1, 1),
                cursor,
            );
            Arc::clone(&simulator.inner).process_statuses(step);
            tokio::time::sleep(LONG_WAIT).await;

            assert!(sent.lock().unwrap().is_empty(), "cursor {cursor}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_stops_simulation() {
        let (emitter, sent) = recording_emitter(Some(1));
        let (simulator, _tx) = build_simulator(emitter);

        simulator.simulate(
            context(vec![
                ProductStatus::Created,
                ProductStatus::Shipped,
                ProductStatus::Delivered,
            ]),
            TimeoutSettingContext::new(1, 1),
        );
        tokio::time::sleep(LONG_WAIT).await;

        assert_eq!(sent_statuses(&sent), vec!["CREATED", "SHIPPED"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_statuses_use_full_sequence() {
        let (emitter, sent) = recording_emitter(None);
        let (simulator, _tx) = build_simulator(emitter);

        simulator.simulate(context(vec![]), TimeoutSettingContext::new(1, 2));
        tokio::time::sleep(LONG_WAIT).await;

        // 完整序列在第一个终态 DELIVERED 处结束
        assert_eq!(
            sent_statuses(&sent),
            vec![
                "CREATED",
                "TAGGED",
                "WAREHOUSED",
                "SHIPPED",
                "IN_TRANSIT",
                "ARRIVED",
                "DELIVERED"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_emission_happens_without_delay() {
        let (emitter, sent) = recording_emitter(None);
        let (simulator, _tx) = build_simulator(emitter);

        simulator.simulate(context(vec![]), TimeoutSettingContext::new(1, 1));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(sent_statuses(&sent), vec!["CREATED"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_at_step_boundary() {
        let (emitter, sent) = recording_emitter(None);
        let (simulator, tx) = build_simulator(emitter);

        simulator.simulate(context(vec![]), TimeoutSettingContext::new(1, 1));
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(true).unwrap();
        tokio::time::sleep(LONG_WAIT).await;

        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_start_emits_nothing() {
        let (emitter, sent) = recording_emitter(None);
        let (simulator, tx) = build_simulator(emitter);

        tx.send(true).unwrap();
        simulator.simulate(context(vec![]), TimeoutSettingContext::new(1, 1));
        tokio::time::sleep(LONG_WAIT).await;

        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_with_current_runtime_outside_runtime_fails() {
        let (_tx, rx) = watch::channel(false);
        let result = StatusSimulator::with_current_runtime(Arc::new(MockStatusEmitter::new()), rx);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SimulationOutcome::Completed.as_str(), "completed");
        assert_eq!(SimulationOutcome::Failed.as_str(), "failed");
        assert_eq!(SimulationOutcome::Exhausted.as_str(), "exhausted");
        assert_eq!(SimulationOutcome::Cancelled.as_str(), "cancelled");
    }
}
