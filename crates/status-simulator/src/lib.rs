//! 商品状态模拟器
//!
//! 为被追踪的商品按序发送状态变更消息：每条消息确认后，若不是终态，
//! 在随机延迟之后发送下一个状态。
//!
//! # 主要模块
//!
//! - `models`: 状态枚举、状态消息与模拟上下文
//! - `strategy`: 预定义状态序列与序列解析
//! - `delay`: 步间随机延迟
//! - `emitter`: 消息发送抽象及 Kafka 实现
//! - `simulator`: 模拟驱动
//! - `api` / `cli`: HTTP 与命令行入口
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use status_simulator::emitter::KafkaStatusEmitter;
//! use status_simulator::models::{ProductStatus, SimulationContext, TimeoutSettingContext};
//! use status_simulator::simulator::StatusSimulator;
//!
//! let (_tx, rx) = tokio::sync::watch::channel(false);
//! let simulator = StatusSimulator::with_current_runtime(Arc::new(emitter), rx)?;
//! simulator.simulate(
//!     SimulationContext::new("ITM-1", 42, "rfid.product.status", vec![]),
//!     TimeoutSettingContext::new(1, 5),
//! );
//! ```

pub mod api;
pub mod cli;
pub mod delay;
pub mod emitter;
pub mod error;
pub mod models;
pub mod simulator;
pub mod strategy;
